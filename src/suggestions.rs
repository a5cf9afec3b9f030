//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Following CLI recommendations,
//! errors should tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goravel_kit_cli::suggestions;
//!
//! // Instead of returning the bare library error:
//! return Err(suggestions::explain(error));
//! ```

use crate::error::Error;

/// Steps to try after every mirror failed to download the template.
pub fn fetch_checklist(branch: &str) -> Vec<String> {
    vec![
        "Check your network connection".to_string(),
        "Retry with --ssh to clone over SSH (or --https if SSH keys are not set up)".to_string(),
        "Use --gitee-only to force the Gitee mirror".to_string(),
        "Use --github-only to force GitHub".to_string(),
        "Use --verbose to see the full git output".to_string(),
        format!("Check that the branch exists: {}", branch),
    ]
}

/// Convert a library error into an `anyhow::Error` carrying hints.
pub fn explain(error: Error) -> anyhow::Error {
    let hints: Vec<String> = match &error {
        Error::DestinationExists { .. } => vec![
            "Pass --force to replace the existing directory".to_string(),
            "Or choose a different project name".to_string(),
        ],
        Error::InvalidProjectName { .. } => {
            vec!["Use a plain directory name such as 'my-app'".to_string()]
        }
        Error::InvalidTemplate { .. } => {
            vec!["Pass the GitHub repository as <owner>/<repo>, e.g. goravel/goravel".to_string()]
        }
        Error::AllMirrorsFailed { last, .. } => last
            .hint()
            .map(|hint| vec![hint.to_string()])
            .unwrap_or_default(),
        Error::NoMirrorEnabled => {
            vec!["Do not combine --gitee-only and --github-only".to_string()]
        }
        _ => Vec::new(),
    };

    if hints.is_empty() {
        return anyhow::Error::new(error);
    }

    let hints = hints
        .iter()
        .map(|hint| format!("hint: {}", hint))
        .collect::<Vec<_>>()
        .join("\n");
    anyhow::anyhow!("{}\n\n{}", error, hints)
}
