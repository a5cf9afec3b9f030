//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use goravel_kit_cli::output::OutputConfig;

use crate::commands;

/// Goravel Kit - Scaffold new Goravel projects from the template repository
#[derive(Parser, Debug)]
#[command(name = "goravel-kit-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new Goravel project
    New(commands::new::NewArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::New(args) => commands::new::execute(args, output),
        }
    }
}

/// Initialise `env_logger`; `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (e.g. from tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
