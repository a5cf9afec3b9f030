//! # Template Mirrors
//!
//! A run fetches its template from an ordered list of [`Mirror`]s. The list
//! is plain configuration built fresh for every invocation, so using the
//! library from several call sites never shares state.
//!
//! Where the list comes from is described by [`MirrorSource`]:
//!
//! - the built-in GitHub and Gitee mirrors, optionally restricted to one of
//!   them, and otherwise narrowed down by a reachability probe;
//! - a GitHub `owner/repo` template slug;
//! - an explicit clone URL.

use std::fmt;

use regex::Regex;

use crate::defaults::{
    GITEE_HOST, GITEE_HTTPS_URL, GITEE_NAME, GITEE_SSH_URL, GITHUB_HOST, GITHUB_HTTPS_URL,
    GITHUB_NAME, GITHUB_SSH_URL, PROBE_PORT,
};
use crate::error::{Error, Result};
use crate::network::NetworkProbe;

/// Order in which built-in mirror hosts are probed.
pub const PROBE_ORDER: &[&str] = &[GITEE_NAME, GITHUB_NAME];

/// Transport used to clone the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Ssh,
}

impl Protocol {
    /// Resolve the `--ssh` / `--https` flags. `--https` wins when both are set.
    pub fn from_flags(ssh: bool, https: bool) -> Self {
        if https || !ssh {
            Protocol::Https
        } else {
            Protocol::Ssh
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Https => write!(f, "https"),
            Protocol::Ssh => write!(f, "ssh"),
        }
    }
}

/// One location the template can be cloned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirror {
    pub name: String,
    pub https_url: String,
    pub ssh_url: String,
    pub enabled: bool,
    /// Host probed during automatic mirror selection, if any.
    pub probe_host: Option<String>,
}

impl Mirror {
    pub fn url(&self, protocol: Protocol) -> &str {
        match protocol {
            Protocol::Https => &self.https_url,
            Protocol::Ssh => &self.ssh_url,
        }
    }
}

/// Restriction of the built-in mirrors (`--gitee-only` / `--github-only`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restriction {
    #[default]
    Auto,
    GiteeOnly,
    GithubOnly,
}

impl Restriction {
    pub fn from_flags(gitee_only: bool, github_only: bool) -> Self {
        match (gitee_only, github_only) {
            (true, _) => Restriction::GiteeOnly,
            (false, true) => Restriction::GithubOnly,
            (false, false) => Restriction::Auto,
        }
    }
}

/// Where the mirrors for a run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorSource {
    Builtin(Restriction),
    /// A GitHub `owner/repo` slug.
    Template(String),
    /// An explicit clone URL, used for both protocols.
    Url(String),
}

impl Default for MirrorSource {
    fn default() -> Self {
        MirrorSource::Builtin(Restriction::Auto)
    }
}

/// How the enabled mirrors were chosen, for progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// The probe found this mirror reachable.
    AutoDetected(String),
    /// No probed host was reachable; every mirror is tried in order.
    AutoAll,
    /// The user restricted the built-in mirrors to this one.
    UserRestricted(String),
    Template(String),
    Url(String),
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AutoDetected(name) => write!(f, "auto-selected {} (network check)", name),
            Strategy::AutoAll => write!(f, "automatic ({} -> {})", GITHUB_NAME, GITEE_NAME),
            Strategy::UserRestricted(name) => write!(f, "{} only (user selected)", name),
            Strategy::Template(slug) => write!(f, "GitHub template {}", slug),
            Strategy::Url(url) => write!(f, "custom repository {}", url),
        }
    }
}

/// The mirrors for one run and how they were chosen.
#[derive(Debug, Clone)]
pub struct MirrorPlan {
    pub mirrors: Vec<Mirror>,
    pub strategy: Strategy,
}

impl MirrorPlan {
    /// Enabled mirrors with their positions in the full list.
    pub fn enabled(&self) -> impl Iterator<Item = (usize, &Mirror)> {
        self.mirrors.iter().enumerate().filter(|(_, m)| m.enabled)
    }

    pub fn has_next_mirror(&self, index: usize) -> bool {
        has_next_mirror(&self.mirrors, index)
    }
}

/// Returns `true` if an enabled mirror follows position `index`.
pub fn has_next_mirror(mirrors: &[Mirror], index: usize) -> bool {
    mirrors.iter().skip(index + 1).any(|m| m.enabled)
}

/// The built-in GitHub and Gitee mirrors, in declaration order.
pub fn builtin_mirrors(restriction: Restriction) -> Vec<Mirror> {
    vec![
        Mirror {
            name: GITHUB_NAME.to_string(),
            https_url: GITHUB_HTTPS_URL.to_string(),
            ssh_url: GITHUB_SSH_URL.to_string(),
            enabled: restriction != Restriction::GiteeOnly,
            probe_host: Some(GITHUB_HOST.to_string()),
        },
        Mirror {
            name: GITEE_NAME.to_string(),
            https_url: GITEE_HTTPS_URL.to_string(),
            ssh_url: GITEE_SSH_URL.to_string(),
            enabled: restriction != Restriction::GithubOnly,
            probe_host: Some(GITEE_HOST.to_string()),
        },
    ]
}

/// A single GitHub mirror for an `owner/repo` template slug.
pub fn template_mirror(slug: &str) -> Result<Mirror> {
    let pattern = Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$")?;
    let slug = slug.trim().trim_end_matches(".git");
    let dots_only = slug
        .split('/')
        .any(|segment| segment.chars().all(|c| c == '.'));
    if !pattern.is_match(slug) || dots_only {
        return Err(Error::InvalidTemplate {
            slug: slug.to_string(),
        });
    }

    Ok(Mirror {
        name: GITHUB_NAME.to_string(),
        https_url: format!("https://{}/{}.git", GITHUB_HOST, slug),
        ssh_url: format!("git@{}:{}.git", GITHUB_HOST, slug),
        enabled: true,
        probe_host: None,
    })
}

/// A single mirror cloning from `url` regardless of protocol.
pub fn url_mirror(url: &str) -> Mirror {
    Mirror {
        name: "Custom".to_string(),
        https_url: url.to_string(),
        ssh_url: url.to_string(),
        enabled: true,
        probe_host: None,
    }
}

/// Build the mirror list for `source`.
///
/// For unrestricted built-in mirrors the hosts are probed in
/// [`PROBE_ORDER`]; the first reachable one becomes the only enabled mirror.
/// When none is reachable every mirror stays enabled.
pub fn select_mirrors(source: &MirrorSource, probe: &dyn NetworkProbe) -> Result<MirrorPlan> {
    let plan = match source {
        MirrorSource::Builtin(Restriction::Auto) => {
            let mut mirrors = builtin_mirrors(Restriction::Auto);
            let strategy = match probe_first_reachable(&mirrors, probe) {
                Some(name) => {
                    for mirror in &mut mirrors {
                        mirror.enabled = mirror.name == name;
                    }
                    Strategy::AutoDetected(name)
                }
                None => Strategy::AutoAll,
            };
            MirrorPlan { mirrors, strategy }
        }
        MirrorSource::Builtin(restriction) => {
            let name = match restriction {
                Restriction::GithubOnly => GITHUB_NAME,
                _ => GITEE_NAME,
            };
            MirrorPlan {
                mirrors: builtin_mirrors(*restriction),
                strategy: Strategy::UserRestricted(name.to_string()),
            }
        }
        MirrorSource::Template(slug) => MirrorPlan {
            mirrors: vec![template_mirror(slug)?],
            strategy: Strategy::Template(slug.clone()),
        },
        MirrorSource::Url(url) => MirrorPlan {
            mirrors: vec![url_mirror(url)],
            strategy: Strategy::Url(url.clone()),
        },
    };

    if plan.enabled().next().is_none() {
        return Err(Error::NoMirrorEnabled);
    }

    Ok(plan)
}

fn probe_first_reachable(mirrors: &[Mirror], probe: &dyn NetworkProbe) -> Option<String> {
    PROBE_ORDER.iter().find_map(|name| {
        let mirror = mirrors.iter().find(|m| m.name == *name)?;
        let host = mirror.probe_host.as_deref()?;
        let reachable = probe.is_reachable(host, PROBE_PORT);
        log::debug!("probe {} ({}): reachable={}", name, host, reachable);
        reachable.then(|| mirror.name.clone())
    })
}
