//! # Goravel Kit Library
//!
//! This library provides the core functionality for scaffolding new Goravel
//! projects from a template repository. It is designed to be used by the
//! `goravel-kit-cli` command-line tool but can also be driven directly, for
//! example with a custom [`repository::RepositoryFetcher`].
//!
//! ## Core Concepts
//!
//! - **Mirrors (`mirror`)**: The template is hosted on GitHub and Gitee. The
//!   mirror list is built per run, optionally narrowed by a network probe
//!   (`network`) or replaced by a custom template or URL.
//! - **Fetching (`git`, `repository`)**: A shallow `git clone` run as a
//!   subprocess with a timeout, its output relayed to the console and its
//!   failures classified into actionable errors.
//! - **Template processing (`template`, `filesystem`)**: Repository metadata
//!   is stripped, the tree is moved into place, and the `.env` file and Go
//!   module name are adapted to the new project.
//! - **Bootstrap (`bootstrap`)**: The template's own CLI generates the
//!   application key and JWT secret.
//! - **Phases (`phases`)**: The pipeline that ties all of the above together.
//!
//! ## Execution Flow
//!
//! The main entry point is [`phases::execute_new`], which executes the
//! following high-level steps:
//!
//! 1.  **Preflight**: Validate the project name and the destination.
//! 2.  **Mirror selection**: Probe Gitee and GitHub unless a mirror was forced.
//! 3.  **Fetch**: Clone from each enabled mirror until one succeeds.
//! 4.  **Install**: Strip metadata and relocate the tree to the destination.
//! 5.  **Post-processing**: Configure `.env`, rename the module, bootstrap.
//!
//! ## Quick Example
//!
//! ```no_run
//! use goravel_kit_cli::mirror::MirrorSource;
//! use goravel_kit_cli::network::TcpProbe;
//! use goravel_kit_cli::output::Reporter;
//! use goravel_kit_cli::phases::{execute_new, ProjectTarget};
//! use goravel_kit_cli::repository::GitCliFetcher;
//!
//! let reporter = Reporter::silent();
//! let target = ProjectTarget::new("my-app", ".");
//! let fetcher = GitCliFetcher::new(reporter.clone());
//!
//! let report = execute_new(
//!     &target,
//!     &MirrorSource::default(),
//!     &fetcher,
//!     &TcpProbe::default(),
//!     &reporter,
//! )
//! .unwrap();
//! println!("created {}", report.project_dir.display());
//! ```

pub mod bootstrap;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod mirror;
pub mod network;
pub mod output;
pub mod phases;
pub mod repository;
pub mod suggestions;
pub mod template;

#[cfg(test)]
mod template_proptest;
