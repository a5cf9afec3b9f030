//! # Output Configuration
//!
//! This module provides utilities for controlling CLI output appearance,
//! including color and emoji support based on terminal capabilities and
//! user preferences, and the [`Reporter`] used to print progress.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use goravel_kit_cli::output::{OutputConfig, Reporter};
//!
//! let reporter = Reporter::new(OutputConfig::from_env_and_flag("auto"), false);
//! reporter.step("📥", "[FETCH]", "Downloading template...");
//! ```

use std::env;
use std::fmt::Display;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Plain,
    Step,
    Info,
    Warn,
    Error,
    Emphasis,
}

/// Prints human-readable progress for a single command invocation.
///
/// Detail lines are only shown in verbose mode; a silent reporter prints
/// nothing at all.
#[derive(Debug, Clone)]
pub struct Reporter {
    config: OutputConfig,
    verbose: bool,
    silent: bool,
}

impl Reporter {
    pub fn new(config: OutputConfig, verbose: bool) -> Self {
        Self {
            config,
            verbose,
            silent: false,
        }
    }

    /// A reporter that swallows all output, for library callers and tests.
    pub fn silent() -> Self {
        Self {
            config: OutputConfig::without_color(),
            verbose: false,
            silent: true,
        }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// A progress step, e.g. "📥 Downloading template from GitHub".
    pub fn step(&self, icon: &str, plain: &str, message: impl Display) {
        self.print(Tone::Step, icon, plain, message);
    }

    /// Supplementary information about the current step.
    pub fn info(&self, icon: &str, plain: &str, message: impl Display) {
        self.print(Tone::Info, icon, plain, message);
    }

    /// Information shown only with `--verbose`.
    pub fn detail(&self, icon: &str, plain: &str, message: impl Display) {
        if self.verbose {
            self.print(Tone::Plain, icon, plain, message);
        }
    }

    pub fn warn(&self, message: impl Display) {
        self.print(Tone::Warn, "⚠️ ", "[WARN]", message);
    }

    pub fn error(&self, message: impl Display) {
        self.print(Tone::Error, "❌", "[ERROR]", message);
    }

    /// A highlighted headline, e.g. the final success message.
    pub fn headline(&self, icon: &str, plain: &str, message: impl Display) {
        self.print(Tone::Emphasis, icon, plain, message);
    }

    /// An unadorned line of text.
    pub fn line(&self, message: impl Display) {
        if !self.silent {
            println!("{}", message);
        }
    }

    fn print(&self, tone: Tone, icon: &str, plain: &str, message: impl Display) {
        if self.silent {
            return;
        }

        let marker = emoji(&self.config, icon, plain);
        let text = format!("{} {}", marker, message);
        let styled = style(text).force_styling(self.config.use_color);
        let styled = match tone {
            Tone::Plain => styled,
            Tone::Step => styled.green(),
            Tone::Info => styled.cyan(),
            Tone::Warn => styled.yellow(),
            Tone::Error => styled.red(),
            Tone::Emphasis => styled.cyan().bold(),
        };
        println!("{}", styled);
    }
}
