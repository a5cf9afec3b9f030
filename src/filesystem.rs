//! # Host Filesystem Helpers
//!
//! Existence probes and the directory relocator used to move a fetched
//! template into its final location.
//!
//! [`relocate`] tries an atomic rename first. When that fails (typically
//! because the temporary directory lives on another device) it falls back to
//! [`copy_tree`] followed by removal of the source. A destination left
//! partially written by a failed copy is not rolled back.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Returns `true` if `path` exists and is a directory.
pub fn directory_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// Returns `true` if `path` exists and is not a directory.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|m| !m.is_dir()).unwrap_or(false)
}

/// Remove a file or directory tree. Missing paths are not an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let result = if directory_exists(path) {
        fs::remove_dir_all(path)
    } else if fs::symlink_metadata(path).is_ok() {
        fs::remove_file(path)
    } else {
        return Ok(());
    };

    result.map_err(|e| Error::Filesystem {
        message: format!("Failed to remove '{}': {}", path.display(), e),
    })
}

/// How a directory ended up at its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Moved with a single rename.
    Renamed,
    /// Copied file by file, then the source was removed.
    Copied,
}

/// Move `source` to `destination`, falling back to copy + delete when a
/// rename is not possible.
///
/// The destination must not exist; callers remove it beforehand.
pub fn relocate(source: &Path, destination: &Path) -> Result<Relocation> {
    relocate_with(source, destination, |from, to| fs::rename(from, to))
}

/// [`relocate`] with the rename step supplied by the caller.
pub fn relocate_with<F>(source: &Path, destination: &Path, rename: F) -> Result<Relocation>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    match rename(source, destination) {
        Ok(()) => return Ok(Relocation::Renamed),
        Err(e) => log::info!(
            "rename {} -> {} failed ({}), copying instead",
            source.display(),
            destination.display(),
            e
        ),
    }

    // Nothing to copy: fail before copy_tree creates the destination.
    if !directory_exists(source) {
        return Err(Error::Filesystem {
            message: format!("Source directory '{}' does not exist", source.display()),
        });
    }

    copy_tree(source, destination)?;
    fs::remove_dir_all(source).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to clean up source directory '{}': {}",
            source.display(),
            e
        ),
    })?;

    Ok(Relocation::Copied)
}

/// Recursively copy `source` into `destination`, preserving permission modes.
///
/// Directory modes are applied after their contents are written so that a
/// read-only directory can still be populated.
pub fn copy_tree(source: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to create directory '{}': {}",
            destination.display(),
            e
        ),
    })?;

    let mut directories = Vec::new();

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::Filesystem {
            message: format!("Failed to walk '{}': {}", source.display(), e),
        })?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::Filesystem {
                message: format!("Path outside of '{}': {}", source.display(), e),
            })?;
        let target = destination.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", target.display(), e),
            })?;
            let permissions = entry.metadata().map_err(|e| Error::Filesystem {
                message: format!("Failed to stat '{}': {}", entry.path().display(), e),
            })?;
            directories.push((target, permissions.permissions()));
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    // Deepest directories first.
    for (dir, permissions) in directories.into_iter().rev() {
        fs::set_permissions(&dir, permissions).map_err(|e| Error::Filesystem {
            message: format!("Failed to set permissions on '{}': {}", dir.display(), e),
        })?;
    }

    Ok(())
}

/// Copy a single file's bytes and permission mode.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to copy '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ),
    })?;

    let permissions = fs::metadata(source)?.permissions();
    fs::set_permissions(destination, permissions).map_err(|e| Error::Filesystem {
        message: format!(
            "Failed to set permissions on '{}': {}",
            destination.display(),
            e
        ),
    })
}

#[cfg(unix)]
fn copy_symlink(source: &Path, destination: &Path) -> Result<()> {
    let link = fs::read_link(source)?;
    std::os::unix::fs::symlink(&link, destination).map_err(|e| Error::Filesystem {
        message: format!("Failed to create symlink '{}': {}", destination.display(), e),
    })
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, destination: &Path) -> Result<()> {
    copy_file(source, destination)
}
