//! Phase 3: Fetch
//!
//! Downloads the template into a scoped temporary directory, trying the
//! enabled mirrors in declaration order until one succeeds.
//!
//! Each attempt clones into its own `attempt-N` sub-directory so that a
//! failed, partially written clone never leaks into the next attempt. The
//! whole temporary directory is removed when the [`ScratchDir`] guard is
//! dropped, on success and on every error path.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tempfile::TempDir;

use crate::defaults::TEMP_DIR_PREFIX;
use crate::error::{Error, FetchError, Result};
use crate::filesystem::remove_path;
use crate::mirror::MirrorPlan;
use crate::output::Reporter;
use crate::repository::RepositoryFetcher;
use crate::suggestions;

use super::ProjectTarget;

/// Temporary working directory owned by a single run.
pub struct ScratchDir {
    dir: TempDir,
    reporter: Reporter,
}

impl ScratchDir {
    /// Create a uniquely named directory under `parent` (or the OS default).
    pub fn create(parent: Option<&Path>, reporter: &Reporter) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| Error::Filesystem {
            message: format!("Failed to create temporary directory: {}", e),
        })?;

        log::debug!("scratch directory: {}", dir.path().display());
        Ok(Self {
            dir,
            reporter: reporter.clone(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fresh clone target for the mirror at `index`.
    pub fn attempt_dir(&self, index: usize) -> PathBuf {
        self.path().join(format!("attempt-{}", index + 1))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let path = self.dir.path();
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_dir_all(path) {
            log::warn!("failed to clean up {}: {}", path.display(), e);
            if self.reporter.is_verbose() {
                self.reporter
                    .warn(format!("Failed to clean up temporary directory: {}", e));
            }
        }
    }
}

/// A successfully downloaded template.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub mirror: String,
    pub url: String,
    /// Root of the cloned tree inside the scratch directory.
    pub tree: PathBuf,
}

/// Execute Phase 3: try each enabled mirror until one clone succeeds.
pub fn execute(
    plan: &MirrorPlan,
    target: &ProjectTarget,
    scratch: &ScratchDir,
    fetcher: &dyn RepositoryFetcher,
    reporter: &Reporter,
) -> Result<FetchOutcome> {
    let mut attempts = 0;
    let mut last_error: Option<FetchError> = None;

    for (index, mirror) in plan.enabled() {
        attempts += 1;
        let url = mirror.url(target.protocol);
        let tree = scratch.attempt_dir(index);

        reporter.line("");
        reporter.step(
            "📥",
            "[FETCH]",
            format!("Downloading template from {}...", mirror.name),
        );
        reporter.info("📍", "  -", format!("Repository: {}", url));
        reporter.info("🌿", "  -", format!("Branch: {}", target.branch));

        let start = Instant::now();
        match fetcher.fetch(url, &target.branch, &tree, target.timeout) {
            Ok(()) => {
                let elapsed = start.elapsed();
                log::info!("fetched template from {} ({})", mirror.name, url);
                if reporter.is_verbose() {
                    reporter.step(
                        "✅",
                        "[OK]",
                        format!("Download completed in {:.2}s", elapsed.as_secs_f64()),
                    );
                } else {
                    reporter.step("✅", "[OK]", "Download completed");
                }
                return Ok(FetchOutcome {
                    mirror: mirror.name.clone(),
                    url: url.to_string(),
                    tree,
                });
            }
            Err(error) => {
                reporter.error(format!("{} download failed: {}", mirror.name, error));
                if let Some(hint) = error.hint() {
                    reporter.detail("💡", "[HINT]", hint);
                }
                if let Err(e) = remove_path(&tree) {
                    log::warn!("failed to remove partial clone: {}", e);
                }
                last_error = Some(error);

                if plan.has_next_mirror(index) {
                    reporter.warn("Trying the next mirror...");
                }
            }
        }
    }

    let last = last_error.ok_or(Error::NoMirrorEnabled)?;

    reporter.line("");
    reporter.error("All template mirrors failed!");
    reporter.info("💡", "[HINT]", "Things to try:");
    for (i, step) in suggestions::fetch_checklist(&target.branch).iter().enumerate() {
        reporter.info("  ", "  ", format!("{}. {}", i + 1, step));
    }

    Err(Error::AllMirrorsFailed { attempts, last })
}
