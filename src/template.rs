//! # Template Post-Processing
//!
//! Turns a raw clone of the template into a new project:
//!
//! 1. [`sanitize`] removes version-control metadata and files that belong to
//!    the template itself (license, readme, CI configuration).
//! 2. [`generate_env_file`] creates `.env` from `.env.example`.
//! 3. [`update_env_file`] rewrites the application name and URL in `.env`.
//! 4. [`update_module_file`] optionally renames the Go module in `go.mod`.
//!
//! Substitutions are literal, first-occurrence substring replacements. The
//! env file is not parsed, so a placeholder that appears inside another value
//! is rewritten too.

use std::fs;
use std::path::Path;

use crate::defaults::{
    ENV_APP_NAME_PLACEHOLDER, ENV_APP_URL_DEFAULT, ENV_APP_URL_REPLACEMENT, ENV_EXAMPLE_FILE,
    ENV_FILE, MODULE_FILE, STRIPPED_PATHS,
};
use crate::error::Result;
use crate::filesystem::{file_exists, remove_path};

const MODULE_KEYWORD: &str = "module";

/// Remove template-only paths from `root`, returning the ones that existed.
pub fn sanitize(root: &Path) -> Result<Vec<&'static str>> {
    let mut removed = Vec::new();

    for name in STRIPPED_PATHS {
        let path = root.join(name);
        if fs::symlink_metadata(&path).is_ok() {
            remove_path(&path)?;
            log::debug!("removed {}", path.display());
            removed.push(*name);
        }
    }

    Ok(removed)
}

/// What to do with an existing `.env` when `.env.example` is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvPolicy {
    /// Always regenerate `.env` from the example.
    #[default]
    Overwrite,
    /// Keep a `.env` that already exists.
    PreserveExisting,
}

/// Result of [`generate_env_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileOutcome {
    Created,
    Preserved,
    NoExample,
}

/// Copy `.env.example` to `.env` in `project_dir`, honouring `policy`.
pub fn generate_env_file(project_dir: &Path, policy: EnvPolicy) -> Result<EnvFileOutcome> {
    let example = project_dir.join(ENV_EXAMPLE_FILE);
    let env = project_dir.join(ENV_FILE);

    if !file_exists(&example) {
        return Ok(EnvFileOutcome::NoExample);
    }

    if policy == EnvPolicy::PreserveExisting && file_exists(&env) {
        return Ok(EnvFileOutcome::Preserved);
    }

    let content = fs::read(&example)?;
    fs::write(&env, content)?;
    Ok(EnvFileOutcome::Created)
}

/// Substitute the project name and local URL into env file `content`.
pub fn substitute_env(content: &str, project_name: &str) -> String {
    content
        .replacen(
            ENV_APP_NAME_PLACEHOLDER,
            &format!("APP_NAME={}", project_name),
            1,
        )
        .replacen(ENV_APP_URL_DEFAULT, ENV_APP_URL_REPLACEMENT, 1)
}

/// Apply [`substitute_env`] to `.env` in `project_dir`.
///
/// Returns `Ok(false)` without touching anything when there is no `.env`.
pub fn update_env_file(project_dir: &Path, project_name: &str) -> Result<bool> {
    let env = project_dir.join(ENV_FILE);
    if !file_exists(&env) {
        return Ok(false);
    }

    let content = fs::read_to_string(&env)?;
    fs::write(&env, substitute_env(&content, project_name))?;
    Ok(true)
}

/// Replace the `module` line at the top of a `go.mod` with one naming
/// `module_name`.
///
/// Returns `None` when the first line is not a module declaration. Other
/// lines and the line separator are preserved.
pub fn rewrite_module_declaration(content: &str, module_name: &str) -> Option<String> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (content, None),
    };

    let is_declaration = first
        .strip_prefix(MODULE_KEYWORD)
        .is_some_and(|tail| tail.is_empty() || tail.starts_with(char::is_whitespace));
    if !is_declaration {
        return None;
    }

    let carriage_return = if first.ends_with('\r') { "\r" } else { "" };
    let mut updated = format!("{} {}{}", MODULE_KEYWORD, module_name, carriage_return);
    if let Some(rest) = rest {
        updated.push('\n');
        updated.push_str(rest);
    }
    Some(updated)
}

/// Apply [`rewrite_module_declaration`] to `go.mod` in `project_dir`.
///
/// Returns `Ok(false)` when there is no `go.mod` or its first line is not a
/// module declaration.
pub fn update_module_file(project_dir: &Path, module_name: &str) -> Result<bool> {
    let path = project_dir.join(MODULE_FILE);
    if !file_exists(&path) {
        return Ok(false);
    }

    let content = fs::read_to_string(&path)?;
    match rewrite_module_declaration(&content, module_name) {
        Some(updated) => {
            fs::write(&path, updated)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
