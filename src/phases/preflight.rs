//! Phase 1: Preflight
//!
//! Validates the project name and checks the destination before anything
//! touches the network or the filesystem.

use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

use super::ProjectTarget;

/// Execute Phase 1, returning the destination directory.
pub fn execute(target: &ProjectTarget) -> Result<PathBuf> {
    validate_name(&target.name)?;

    let destination = target.destination();
    if fs::symlink_metadata(&destination).is_ok() && !target.force {
        return Err(Error::DestinationExists { path: destination });
    }

    Ok(destination)
}

/// Check that `name` can be used as a new directory name.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("must be a single path component")
    } else if name == "." || name == ".." {
        Some("must name a new directory")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
