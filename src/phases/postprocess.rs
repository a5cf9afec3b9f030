//! Phase 5: Post-processing
//!
//! Prepares the environment file, optionally renames the Go module, and
//! runs the bootstrap commands. Nothing here is fatal: every failure is
//! printed and returned as a [`Warning`].

use std::path::Path;

use crate::bootstrap;
use crate::error::Warning;
use crate::output::Reporter;
use crate::template::{self, EnvFileOutcome};

use super::ProjectTarget;

/// Execute Phase 5 inside `project_dir`.
pub fn execute(target: &ProjectTarget, project_dir: &Path, reporter: &Reporter) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if let Err(warning) = prepare_env(target, project_dir, reporter) {
        reporter.warn(&warning);
        warnings.push(warning);
    }

    if target.rename_module {
        match template::update_module_file(project_dir, &target.name) {
            Ok(true) => reporter.step(
                "📦",
                "[MOD]",
                format!("Module renamed to {}", target.name),
            ),
            Ok(false) => reporter.detail("📦", "[MOD]", "No module declaration to rename"),
            Err(e) => {
                let warning = Warning::ModuleName {
                    message: e.to_string(),
                };
                reporter.warn(&warning);
                warnings.push(warning);
            }
        }
    }

    if !target.bootstrap.is_empty() {
        reporter.step("🔑", "[KEY]", "Generating application secrets...");
        match bootstrap::run(&target.bootstrap, project_dir, reporter) {
            Ok(()) => reporter.step("✅", "[OK]", "Application secrets generated"),
            Err(warning) => {
                reporter.warn(&warning);
                warnings.push(warning);
            }
        }
    }

    warnings
}

fn prepare_env(
    target: &ProjectTarget,
    project_dir: &Path,
    reporter: &Reporter,
) -> Result<(), Warning> {
    let env_warning = |e: crate::error::Error| Warning::EnvFile {
        message: e.to_string(),
    };

    match template::generate_env_file(project_dir, target.env_policy).map_err(env_warning)? {
        EnvFileOutcome::Created => {
            reporter.detail("📄", "[ENV]", "Generated .env from .env.example")
        }
        EnvFileOutcome::Preserved => reporter.detail("📄", "[ENV]", "Kept existing .env"),
        EnvFileOutcome::NoExample => {
            reporter.detail("📄", "[ENV]", "No .env.example found, skipping .env");
            return Ok(());
        }
    }

    if template::update_env_file(project_dir, &target.name).map_err(env_warning)? {
        reporter.step("📝", "[ENV]", "Environment configured");
    }
    Ok(())
}
