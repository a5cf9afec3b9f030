//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture that builds a local Goravel-like template
//! repository, so that the `new` command can be exercised end to end through
//! a `file://` URL without network access.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(fixture) = TestFixture::with_template_repo() else { return };
//!     fixture.new_command("my-app").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::should_skip_network_tests;
    #[allow(unused_imports)]
    pub use super::template;
    pub use super::TestFixture;
}

/// Contents of the local template repository.
#[allow(dead_code)]
pub mod template {
    pub const ENV_EXAMPLE: &str = "APP_NAME=Goravel\n\
APP_ENV=local\n\
APP_KEY=\n\
APP_DEBUG=true\n\
APP_URL=http://localhost\n\
APP_HOST=127.0.0.1\n\
DB_CONNECTION=mysql\n";

    pub const GO_MOD: &str = "module goravel\n\ngo 1.22\n\nrequire github.com/goravel/framework v1.14.0\n";

    pub const MAIN_GO: &str = "package main\n\nfunc main() {}\n";

    /// Files the `new` command strips from every project.
    pub const STRIPPED: &[&str] = &[".git", ".github", ".gitignore", "LICENSE", "README.md"];
}

/// Check if network tests should be skipped.
///
/// Returns `true` if the `SKIP_NETWORK_TESTS` environment variable is set.
#[allow(dead_code)]
pub fn should_skip_network_tests() -> bool {
    env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// Returns `true` when a usable `git` binary is on the PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=Goravel Kit Tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// A temporary workspace holding a template repository and a working directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new().with_file("work/my-app/keep.txt", "mine");
/// fixture
///     .command()
///     .args(["new", "my-app", "--repo-url", "file:///nowhere"])
///     .assert()
///     .code(1);
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    repo_url: Option<String>,
}

impl TestFixture {
    /// Create a new test fixture with an empty working directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");
        Self {
            temp_dir,
            repo_url: None,
        }
    }

    /// Create a fixture with a committed template repository on `master`.
    ///
    /// Returns `None` when git is not installed, so callers can skip.
    pub fn with_template_repo() -> Option<Self> {
        if !git_available() {
            eprintln!("git not available, skipping");
            return None;
        }

        let mut fixture = Self::new();
        let repo = fixture.temp_dir.child("template");
        repo.child(".env.example")
            .write_str(template::ENV_EXAMPLE)
            .unwrap();
        repo.child("go.mod").write_str(template::GO_MOD).unwrap();
        repo.child("main.go").write_str(template::MAIN_GO).unwrap();
        repo.child("app/http/kernel.go")
            .write_str("package http\n")
            .unwrap();
        repo.child("README.md").write_str("# Goravel\n").unwrap();
        repo.child("LICENSE").write_str("MIT\n").unwrap();
        repo.child(".gitignore").write_str("/storage\n").unwrap();
        repo.child(".github/workflows/test.yml")
            .write_str("name: test\n")
            .unwrap();

        git(repo.path(), &["init", "-q"]);
        git(repo.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);
        git(repo.path(), &["add", "-A"]);
        git(repo.path(), &["commit", "-q", "-m", "Initial template"]);

        fixture.repo_url = Some(format!("file://{}", repo.path().display()));
        Some(fixture)
    }

    /// Add a file under the working directory.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.work_dir()
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// The directory commands run in.
    pub fn work_dir(&self) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("work")
    }

    /// Path of a project created by the `new` command.
    pub fn project(&self, name: &str) -> PathBuf {
        self.work_dir().path().join(name)
    }

    /// The `file://` URL of the template repository.
    pub fn repo_url(&self) -> &str {
        self.repo_url
            .as_deref()
            .expect("Fixture was created without a template repository")
    }

    /// Create a command configured to run in the working directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("goravel-kit-cli");
        cmd.current_dir(self.work_dir().path())
            .env_remove("GORAVEL_KIT_REPO_URL")
            .env("NO_COLOR", "1");
        cmd
    }

    /// A `new` command cloning from the local template, without bootstrap.
    #[allow(dead_code)]
    pub fn new_command(&self, name: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.args(["new", name, "--no-banner", "--no-bootstrap", "--repo-url"])
            .arg(self.repo_url());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_work_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.work_dir().path().is_dir());
    }

    #[test]
    fn test_fixture_with_file() {
        let fixture = TestFixture::new().with_file("a/b.txt", "hello");
        assert!(fixture.work_dir().path().join("a/b.txt").exists());
    }

    #[test]
    fn test_template_repo_is_committed() {
        let Some(fixture) = TestFixture::with_template_repo() else {
            return;
        };
        assert!(fixture.repo_url().starts_with("file://"));
        assert!(fixture.temp_dir.path().join("template/.git").is_dir());
    }
}
