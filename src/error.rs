//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for
//! goravel-kit-cli. It uses the `thiserror` library to describe every
//! anticipated failure mode with a clear, descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: fatal errors that abort project creation (validation,
//!   exhausted mirrors, filesystem failures).
//! - **`FetchError`**: the classified outcome of a failed clone attempt.
//!   Classification only selects the message and remediation hint; the
//!   orchestrator treats every variant the same way.
//! - **`Warning`**: non-fatal problems after the project directory exists
//!   (env file, module name, bootstrap commands). They are printed and
//!   collected, never propagated.
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for project creation.
#[derive(Error, Debug)]
pub enum Error {
    /// The project name cannot be used as a directory name.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// The destination directory exists and `--force` was not given.
    #[error("Directory '{}' already exists. Use --force to overwrite it", path.display())]
    DestinationExists { path: PathBuf },

    /// A `--template` value is not of the form `owner/repo`.
    #[error("Invalid template '{slug}': expected <owner>/<repo>")]
    InvalidTemplate { slug: String },

    /// Every mirror was disabled, so there was nothing to fetch from.
    #[error("No template mirror is enabled")]
    NoMirrorEnabled,

    /// All enabled mirrors were tried and none succeeded.
    #[error("All template mirrors failed ({attempts} attempted): {last}")]
    AllMirrorsFailed {
        attempts: usize,
        #[source]
        last: FetchError,
    },

    /// A filesystem operation failed, with context about what was attempted.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Classified failure of a single clone attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("authentication failed for {url} after {:.2}s", .elapsed.as_secs_f64())]
    Authentication { url: String, elapsed: Duration },

    #[error("repository not found: {url} (took {:.2}s)", .elapsed.as_secs_f64())]
    RepositoryNotFound { url: String, elapsed: Duration },

    #[error("branch '{branch}' not found (took {:.2}s)", .elapsed.as_secs_f64())]
    BranchNotFound { branch: String, elapsed: Duration },

    #[error("SSH host key verification failed for {url}")]
    HostKeyVerification { url: String },

    #[error("download timed out after {:.2}s", .elapsed.as_secs_f64())]
    Timeout { elapsed: Duration },

    #[error("git clone failed after {:.2}s: {message}", .elapsed.as_secs_f64())]
    Generic { message: String, elapsed: Duration },
}

impl FetchError {
    /// Remediation hint shown next to the failure, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FetchError::Authentication { .. } => Some(
                "Check your credentials, or retry with --ssh (or --https when SSH keys are not set up)",
            ),
            FetchError::RepositoryNotFound { .. } => {
                Some("Check the template name or try another mirror with --gitee-only / --github-only")
            }
            FetchError::BranchNotFound { .. } => {
                Some("Check that the branch exists, or pass a different one with --branch")
            }
            FetchError::HostKeyVerification { .. } => {
                Some("Check your SSH configuration (known_hosts), or retry with --https")
            }
            FetchError::Timeout { .. } => {
                Some("Increase --timeout or try another mirror with --gitee-only / --github-only")
            }
            FetchError::Generic { .. } => None,
        }
    }
}

/// Non-fatal problems reported after the project directory was created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("failed to update .env file: {message}")]
    EnvFile { message: String },

    #[error("failed to update module name: {message}")]
    ModuleName { message: String },

    #[error("command '{command}' failed: {message}")]
    Bootstrap { command: String, message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
