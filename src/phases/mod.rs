//! Implementation of the phases of the `new` operation.
//!
//! ## Overview
//!
//! Creating a project runs these phases strictly in order:
//! 1. Preflight - Validate the project name and refuse to clobber an existing directory
//! 2. Mirror selection - Decide which mirrors to try (probing the network if needed)
//! 3. Fetch - Shallow-clone the template into a scoped temporary directory
//! 4. Install - Strip template metadata and move the tree into place
//! 5. Post-processing - Generate `.env`, rename the module, run bootstrap commands
//!
//! Phases 1-4 are fatal on failure. Post-processing problems are collected
//! as warnings and never undo the created project.

use std::path::PathBuf;
use std::time::Duration;

use crate::bootstrap::{self, BootstrapCommand};
use crate::defaults::{DEFAULT_BRANCH, DEFAULT_TIMEOUT};
use crate::error::Warning;
use crate::mirror::Protocol;
use crate::template::EnvPolicy;

// Phase modules
pub mod fetch;
pub mod install;
pub mod orchestrator;
pub mod postprocess;
pub mod preflight;

pub use orchestrator::execute_new;

/// Everything the user asked for, fixed for the whole run.
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    /// Project name, also the destination directory name.
    pub name: String,
    /// Directory the project is created in.
    pub base_dir: PathBuf,
    pub branch: String,
    pub protocol: Protocol,
    /// Per-mirror download timeout.
    pub timeout: Duration,
    pub force: bool,
    pub env_policy: EnvPolicy,
    pub rename_module: bool,
    /// Commands run inside the new project; empty to skip.
    pub bootstrap: Vec<BootstrapCommand>,
    /// Parent of the scoped temporary directory; the OS default when `None`.
    pub temp_root: Option<PathBuf>,
}

impl ProjectTarget {
    pub fn new(name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            branch: DEFAULT_BRANCH.to_string(),
            protocol: Protocol::default(),
            timeout: DEFAULT_TIMEOUT,
            force: false,
            env_policy: EnvPolicy::default(),
            rename_module: false,
            bootstrap: bootstrap::default_commands(),
            temp_root: None,
        }
    }

    pub fn destination(&self) -> PathBuf {
        self.base_dir.join(&self.name)
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub project_dir: PathBuf,
    /// Mirror the template was downloaded from.
    pub mirror: String,
    pub url: String,
    pub warnings: Vec<Warning>,
}
