//! Orchestrator for the complete `new` operation
//!
//! This module coordinates all phases to provide a clean API for creating a
//! project from a template.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::{fetch, install, postprocess, preflight, ProjectReport, ProjectTarget};
use crate::error::Result;
use crate::mirror::{self, MirrorPlan, MirrorSource, Restriction};
use crate::network::NetworkProbe;
use crate::output::Reporter;
use crate::repository::RepositoryFetcher;

/// Execute the complete `new` operation (Phases 1-5)
///
/// This orchestrates the complete pipeline:
/// 1. Validate the name and check the destination
/// 2. Select mirrors, probing the network when no mirror was forced
/// 3. Clone the template into a scoped temporary directory
/// 4. Strip template metadata and move the tree into place
/// 5. Configure the new project and run its bootstrap commands
///
/// The destination is not touched before Phase 4, so any failure up to and
/// including the last mirror leaves an existing directory as it was. The
/// temporary directory is removed on every exit path.
pub fn execute_new(
    target: &ProjectTarget,
    source: &MirrorSource,
    fetcher: &dyn RepositoryFetcher,
    probe: &dyn NetworkProbe,
    reporter: &Reporter,
) -> Result<ProjectReport> {
    // Phase 1: Preflight
    let destination = preflight::execute(target)?;

    // Phase 2: Mirror selection
    let plan = select_mirrors(source, probe, reporter)?;
    describe_plan(&plan, target, reporter);

    // Phase 3: Fetch
    let scratch = fetch::ScratchDir::create(target.temp_root.as_deref(), reporter)?;
    let outcome = fetch::execute(&plan, target, &scratch, fetcher, reporter)?;

    // Phase 4: Install
    reporter.line("");
    install::execute(&outcome.tree, &destination, reporter)?;
    drop(scratch);

    // Phase 5: Post-processing
    let warnings = postprocess::execute(target, &destination, reporter);

    Ok(ProjectReport {
        project_dir: destination,
        mirror: outcome.mirror,
        url: outcome.url,
        warnings,
    })
}

fn select_mirrors(
    source: &MirrorSource,
    probe: &dyn NetworkProbe,
    reporter: &Reporter,
) -> Result<MirrorPlan> {
    if !matches!(source, MirrorSource::Builtin(Restriction::Auto)) {
        return mirror::select_mirrors(source, probe);
    }

    reporter.step("🌐", "[NET]", "Checking network connectivity...");
    let spinner = if reporter.is_silent() {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Probing template mirrors");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let plan = mirror::select_mirrors(source, probe);
    spinner.finish_and_clear();
    plan
}

fn describe_plan(plan: &MirrorPlan, target: &ProjectTarget, reporter: &Reporter) {
    reporter.info("🎯", "[MIRROR]", format!("Strategy: {}", plan.strategy));
    reporter.info("🔗", "[PROTO]", format!("Protocol: {}", target.protocol));
    reporter.detail(
        "⏱️ ",
        "[TIME]",
        format!("Timeout per mirror: {}s", target.timeout.as_secs()),
    );
    for (_, mirror) in plan.enabled() {
        reporter.detail("  ", "  -", format!("{}: {}", mirror.name, mirror.url(target.protocol)));
    }
}
