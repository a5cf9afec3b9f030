//! Default values for goravel-kit-cli.
//!
//! This module provides centralized default values and built-in constants
//! used across the library and the `new` command, ensuring consistency and
//! avoiding duplication.

use std::time::Duration;

/// Default template branch when `--branch` is not given.
pub const DEFAULT_BRANCH: &str = "master";

/// Default per-mirror download timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3 * 60);

/// Timeout for a single TCP reachability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Port used when probing mirror hosts.
pub const PROBE_PORT: u16 = 443;

/// Prefix of the per-run temporary directory.
pub const TEMP_DIR_PREFIX: &str = "goravel-kit-";

pub const GITHUB_NAME: &str = "GitHub";
pub const GITHUB_HOST: &str = "github.com";
pub const GITHUB_HTTPS_URL: &str = "https://github.com/hulutech-web/goravel-kit.git";
pub const GITHUB_SSH_URL: &str = "git@github.com:hulutech-web/goravel-kit.git";

pub const GITEE_NAME: &str = "Gitee";
pub const GITEE_HOST: &str = "gitee.com";
pub const GITEE_HTTPS_URL: &str = "https://gitee.com/hulutech/goravel-kit.git";
pub const GITEE_SSH_URL: &str = "git@gitee.com:hulutech/goravel-kit.git";

/// Paths removed from a freshly cloned template, relative to its root.
pub const STRIPPED_PATHS: &[&str] = &[".git", ".github", ".gitignore", "LICENSE", "README.md"];

pub const ENV_EXAMPLE_FILE: &str = ".env.example";
pub const ENV_FILE: &str = ".env";
pub const MODULE_FILE: &str = "go.mod";

/// Placeholder application name shipped in the template's env file.
pub const ENV_APP_NAME_PLACEHOLDER: &str = "APP_NAME=Goravel";
pub const ENV_APP_URL_DEFAULT: &str = "APP_URL=http://localhost";
pub const ENV_APP_URL_REPLACEMENT: &str = "APP_URL=http://localhost:3000";

/// Commands run inside a new project to generate its application secrets.
pub const BOOTSTRAP_COMMANDS: &[&[&str]] = &[
    &["go", "run", ".", "artisan", "key:generate"],
    &["go", "run", ".", "artisan", "jwt:secret"],
];
