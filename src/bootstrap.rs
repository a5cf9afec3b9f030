//! Post-create bootstrap commands.
//!
//! After the project directory exists, the template's own CLI is used to
//! generate the application key and the JWT secret. Failures never undo the
//! project: the first failing command stops the sequence and is reported as
//! a [`Warning`].

use std::path::Path;
use std::process::Command;

use crate::defaults::BOOTSTRAP_COMMANDS;
use crate::error::Warning;
use crate::output::Reporter;

/// A command run inside the new project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BootstrapCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The command line as typed by a user.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The key and JWT secret generators shipped with the template.
pub fn default_commands() -> Vec<BootstrapCommand> {
    BOOTSTRAP_COMMANDS
        .iter()
        .filter_map(|parts| {
            let (program, args) = parts.split_first()?;
            Some(BootstrapCommand::new(program, args))
        })
        .collect()
}

/// Run `commands` in order inside `project_dir`, stopping at the first
/// failure.
pub fn run(
    commands: &[BootstrapCommand],
    project_dir: &Path,
    reporter: &Reporter,
) -> Result<(), Warning> {
    for command in commands {
        let display = command.display();
        reporter.detail("🔧", "[RUN]", format!("Running: {}", display));
        log::debug!("bootstrap: {} in {}", display, project_dir.display());

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(project_dir)
            .output()
            .map_err(|e| Warning::Bootstrap {
                command: display.clone(),
                message: e.to_string(),
            })?;

        if reporter.is_verbose() {
            for text in [&output.stdout, &output.stderr]
                .into_iter()
                .filter_map(|bytes| captured_text(bytes))
            {
                reporter.line(text);
            }
        }

        if !output.status.success() {
            return Err(Warning::Bootstrap {
                command: display,
                message: output.status.to_string(),
            });
        }
    }

    Ok(())
}

/// Captured output worth printing, or `None` when it is blank.
fn captured_text(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_end();
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_commands() {
        let commands = default_commands();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].display(), "go run . artisan key:generate");
        assert_eq!(commands[1].display(), "go run . artisan jwt:secret");
    }

    #[test]
    fn test_run_in_project_directory() {
        let temp_dir = TempDir::new().unwrap();
        let commands = vec![BootstrapCommand::new("sh", &["-c", "touch generated.key"])];

        run(&commands, temp_dir.path(), &Reporter::silent()).unwrap();

        assert!(temp_dir.path().join("generated.key").exists());
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let temp_dir = TempDir::new().unwrap();
        let commands = vec![
            BootstrapCommand::new("sh", &["-c", "exit 3"]),
            BootstrapCommand::new("sh", &["-c", "touch second"]),
        ];

        let warning = run(&commands, temp_dir.path(), &Reporter::silent()).unwrap_err();

        match warning {
            Warning::Bootstrap { command, .. } => assert_eq!(command, "sh -c exit 3"),
            other => panic!("unexpected warning: {:?}", other),
        }
        assert!(!temp_dir.path().join("second").exists());
    }

    #[test]
    fn test_captured_text_skips_blank_output() {
        assert_eq!(captured_text(b""), None);
        assert_eq!(captured_text(b"\n  \n"), None);
        assert_eq!(
            captured_text(b"Application key set successfully.\n"),
            Some("Application key set successfully.".to_string())
        );
    }

    #[test]
    fn test_run_verbose_with_silent_commands() {
        let temp_dir = TempDir::new().unwrap();
        let commands = vec![BootstrapCommand::new("sh", &["-c", "true"])];
        let reporter = Reporter::new(crate::output::OutputConfig::without_color(), true);

        run(&commands, temp_dir.path(), &reporter).unwrap();
    }

    #[test]
    fn test_run_reports_missing_program() {
        let temp_dir = TempDir::new().unwrap();
        let commands = vec![BootstrapCommand::new("definitely-not-a-real-binary-xyz", &[])];

        assert!(run(&commands, temp_dir.path(), &Reporter::silent()).is_err());
    }
}
