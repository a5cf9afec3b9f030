//! # Template Fetching
//!
//! The orchestrator fetches templates through the [`RepositoryFetcher`]
//! trait so that tests can simulate successful clones, timeouts and each
//! classified failure without running a real `git` process.
//!
//! [`GitCliFetcher`] is the production implementation and wraps
//! [`crate::git::clone_shallow`].

use std::path::Path;
use std::time::Duration;

use crate::error::FetchError;
use crate::git::{self, OutputRelay};
use crate::output::Reporter;

/// Trait for template fetching - allows mocking in tests
pub trait RepositoryFetcher {
    /// Shallow-clone `url` at `branch` into `target_dir` within `timeout`.
    ///
    /// `target_dir` is a fresh path per attempt; on failure it may be left
    /// partially populated and the caller is responsible for removing it.
    fn fetch(
        &self,
        url: &str,
        branch: &str,
        target_dir: &Path,
        timeout: Duration,
    ) -> Result<(), FetchError>;
}

/// Fetches templates with the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCliFetcher {
    relay: OutputRelay,
}

impl GitCliFetcher {
    pub fn new(reporter: Reporter) -> Self {
        Self {
            relay: OutputRelay::new(reporter),
        }
    }
}

impl RepositoryFetcher for GitCliFetcher {
    fn fetch(
        &self,
        url: &str,
        branch: &str,
        target_dir: &Path,
        timeout: Duration,
    ) -> Result<(), FetchError> {
        git::clone_shallow(url, branch, target_dir, timeout, &self.relay)
    }
}
