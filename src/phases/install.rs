//! Phase 4: Install
//!
//! Strips repository metadata from the downloaded tree, clears the
//! destination when overwriting, and moves the tree into place.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::filesystem::{self, Relocation};
use crate::output::Reporter;
use crate::template;

/// Execute Phase 4: turn the clone at `tree` into the project at `destination`.
pub fn execute(tree: &Path, destination: &Path, reporter: &Reporter) -> Result<()> {
    reporter.step("🧹", "[CLEAN]", "Cleaning up template files...");
    for removed in template::sanitize(tree)? {
        reporter.detail("🗑️ ", "  -", format!("Removed {}", removed));
    }

    // Only reachable with --force; preflight rejects existing paths otherwise
    if fs::symlink_metadata(destination).is_ok() {
        log::info!("removing existing {}", destination.display());
        reporter.detail(
            "♻️ ",
            "[DEL]",
            format!("Removing existing {}", destination.display()),
        );
        filesystem::remove_path(destination)?;
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    if filesystem::relocate(tree, destination)? == Relocation::Copied {
        reporter.detail("📋", "[COPY]", "Template copied across filesystems");
    }
    reporter.step("📁", "[DIR]", "Project structure created");

    Ok(())
}
