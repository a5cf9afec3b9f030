//! New command implementation
//!
//! The new command creates a Goravel project in the current directory:
//! 1. Check the project name and destination
//! 2. Pick template mirrors (network probe unless a mirror is forced)
//! 3. Download the template, falling back across mirrors
//! 4. Strip template metadata and move the project into place
//! 5. Configure `.env`, optionally rename the module, generate secrets

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use goravel_kit_cli::bootstrap;
use goravel_kit_cli::defaults::DEFAULT_BRANCH;
use goravel_kit_cli::mirror::{MirrorSource, Protocol, Restriction};
use goravel_kit_cli::network::TcpProbe;
use goravel_kit_cli::output::{OutputConfig, Reporter};
use goravel_kit_cli::phases::{self, ProjectReport, ProjectTarget};
use goravel_kit_cli::repository::GitCliFetcher;
use goravel_kit_cli::suggestions;
use goravel_kit_cli::template::EnvPolicy;

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Name of the project (also the directory that is created)
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,

    /// Overwrite the project directory if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Template branch to clone
    #[arg(short, long, value_name = "BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Show detailed progress and raw git output
    #[arg(short, long)]
    pub verbose: bool,

    /// Clone over SSH
    #[arg(long)]
    pub ssh: bool,

    /// Clone over HTTPS (the default; wins over --ssh)
    ///
    /// Earlier goravel-kit releases cloned over SSH unless --https was given.
    /// This CLI defaults to HTTPS, so pass --ssh to clone with SSH keys.
    #[arg(long)]
    pub https: bool,

    /// Download timeout per mirror
    ///
    /// Duration format: number followed by unit (s, m, h)
    /// Examples: "90s", "3m", "1h"
    #[arg(long, value_name = "DURATION", default_value = "3m", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Don't show the welcome banner
    #[arg(long)]
    pub no_banner: bool,

    /// Only use the Gitee mirror
    #[arg(long, conflicts_with = "github_only")]
    pub gitee_only: bool,

    /// Only use the GitHub mirror
    #[arg(long)]
    pub github_only: bool,

    /// Clone a different GitHub template (<owner>/<repo>)
    #[arg(long, value_name = "OWNER/REPO", conflicts_with_all = ["gitee_only", "github_only"])]
    pub template: Option<String>,

    /// Clone the template from an explicit repository URL
    #[arg(
        long,
        value_name = "URL",
        env = "GORAVEL_KIT_REPO_URL",
        conflicts_with_all = ["gitee_only", "github_only", "template"]
    )]
    pub repo_url: Option<String>,

    /// Keep an existing .env instead of regenerating it from .env.example
    #[arg(long)]
    pub keep_env: bool,

    /// Rewrite the go.mod module name to the project name
    #[arg(long)]
    pub rename_module: bool,

    /// Skip generating the application key and JWT secret
    #[arg(long)]
    pub no_bootstrap: bool,
}

/// Execute the new command
pub fn execute(args: NewArgs, output: OutputConfig) -> Result<()> {
    let reporter = Reporter::new(output, args.verbose);

    if args.no_banner {
        reporter.headline(
            "🚀",
            "[NEW]",
            format!("Creating Goravel project: {}", args.project_name),
        );
    } else {
        print_banner(&reporter, &args.project_name);
    }
    reporter.line("");

    let base_dir = std::env::current_dir().context("Failed to determine the current directory")?;
    let target = build_target(&args, base_dir);
    let source = mirror_source(&args);
    let fetcher = GitCliFetcher::new(reporter.clone());

    let report = phases::execute_new(&target, &source, &fetcher, &TcpProbe::default(), &reporter)
        .map_err(suggestions::explain)?;

    print_next_steps(&reporter, &report, &args);
    Ok(())
}

fn build_target(args: &NewArgs, base_dir: PathBuf) -> ProjectTarget {
    let mut target = ProjectTarget::new(args.project_name.clone(), base_dir);
    target.branch = args.branch.clone();
    target.protocol = Protocol::from_flags(args.ssh, args.https);
    target.timeout = args.timeout;
    target.force = args.force;
    target.env_policy = if args.keep_env {
        EnvPolicy::PreserveExisting
    } else {
        EnvPolicy::Overwrite
    };
    target.rename_module = args.rename_module;
    target.bootstrap = if args.no_bootstrap {
        Vec::new()
    } else {
        bootstrap::default_commands()
    };
    target
}

fn mirror_source(args: &NewArgs) -> MirrorSource {
    if let Some(url) = &args.repo_url {
        MirrorSource::Url(url.clone())
    } else if let Some(slug) = &args.template {
        MirrorSource::Template(slug.clone())
    } else {
        MirrorSource::Builtin(Restriction::from_flags(args.gitee_only, args.github_only))
    }
}

fn print_banner(reporter: &Reporter, project_name: &str) {
    if reporter.is_silent() {
        return;
    }

    let rule = "+".repeat(56);
    reporter.line("");
    reporter.line(&rule);
    reporter.headline("🎉", "|", "Welcome to Goravel Kit CLI");
    reporter.line(format!("|  version {}", env!("CARGO_PKG_VERSION")));
    reporter.line("|  Scaffolding tool for Goravel projects");
    reporter.line(&rule);
    reporter.line("");
    reporter.headline(
        "🚀",
        "[NEW]",
        format!("Creating Goravel project: {}", project_name),
    );
}

fn print_next_steps(reporter: &Reporter, report: &ProjectReport, args: &NewArgs) {
    reporter.line("");
    reporter.headline(
        "🎉",
        "[DONE]",
        format!("Project '{}' created successfully!", args.project_name),
    );
    reporter.info("📍", "  -", format!("Template source: {} ({})", report.mirror, report.url));
    if !report.warnings.is_empty() {
        reporter.warn(format!(
            "Completed with {} warning(s), see above",
            report.warnings.len()
        ));
    }

    reporter.line("");
    reporter.info("📋", "[NEXT]", "Next steps:");
    let mut steps = vec![
        format!("cd {}", args.project_name),
        "go mod tidy".to_string(),
    ];
    if args.no_bootstrap {
        steps.extend(
            bootstrap::default_commands()
                .iter()
                .map(|command| command.display()),
        );
    }
    steps.push("Update the database settings in .env".to_string());
    steps.push("air".to_string());
    for step in steps {
        reporter.step("  ", "  ", step);
    }

    if !args.verbose {
        reporter.line("");
        reporter.info("💡", "[TIP]", "Use --verbose to see detailed output");
    }
}

/// Parse a duration string into a Duration
///
/// Format: number followed by unit (s, m, h)
/// Examples: "90s", "3m", "1h", "1.5m"
fn parse_duration(duration_str: &str) -> Result<Duration> {
    let duration_str = duration_str.trim().to_lowercase();

    if duration_str.is_empty() {
        return Err(anyhow::anyhow!("Duration string cannot be empty"));
    }

    // Find the split point between number and unit
    let split_idx = duration_str
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)
        .unwrap_or(duration_str.len());

    if split_idx == 0 {
        return Err(anyhow::anyhow!("Duration must start with a number"));
    }

    let number_str = &duration_str[..split_idx];
    let unit_str = &duration_str[split_idx..];

    let number: f64 = number_str
        .parse()
        .with_context(|| format!("Invalid number in duration: '{}'", number_str))?;

    let seconds = match unit_str {
        "s" | "sec" | "second" | "seconds" => number,
        "m" | "min" | "minute" | "minutes" => number * 60.0,
        "h" | "hr" | "hour" | "hours" => number * 3600.0,
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid duration unit: '{}'. Valid units: s, m, h",
                unit_str
            ));
        }
    };

    let duration = Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("Duration out of range: '{}'", duration_str))?;
    if duration.is_zero() {
        return Err(anyhow::anyhow!("Duration must be greater than zero"));
    }
    Ok(duration)
}
