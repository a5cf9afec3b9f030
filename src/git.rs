//! Shallow template clones through the system `git` binary.
//!
//! Using the system git command means SSH keys, credential helpers and
//! `~/.gitconfig` settings all apply without extra configuration.
//!
//! The clone runs on a small current-thread tokio runtime: two tasks drain
//! stdout and stderr line by line (relaying them to the console) while the
//! main future waits for the process under the caller's timeout. When the
//! timeout expires the process is killed.
//!
//! The timeout covers the pipes too. A process git leaves behind (an SSH
//! ControlMaster, for one) can hold stdout and stderr open after git exits,
//! so once the process is gone the drains get at most [`DRAIN_GRACE`],
//! never more than what is left of the timeout.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::FetchError;
use crate::output::{emoji, Reporter};

/// Markers of git progress lines worth showing outside verbose mode.
const PROGRESS_MARKERS: &[&str] = &["Receiving objects:", "Resolving deltas:", "remote:"];

/// How long to keep reading the pipes after the process has exited.
pub const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Build the argument list for a shallow, single-branch clone.
pub fn clone_args(url: &str, branch: &str, target_dir: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["clone".into(), "--progress".into(), "--depth".into(), "1".into()];

    if !branch.is_empty() {
        args.push("--branch".into());
        args.push(branch.into());
        args.push("--single-branch".into());
    }

    args.push(url.into());
    args.push(target_dir.as_os_str().to_os_string());
    args
}

/// Returns `true` for lines that report clone progress.
pub fn is_progress_line(line: &str) -> bool {
    PROGRESS_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Map git's error output to a [`FetchError`].
///
/// This is a best-effort hint layer: the substrings depend on git's version
/// and locale, and anything unrecognised becomes [`FetchError::Generic`].
pub fn classify_failure(stderr: &str, url: &str, branch: &str, elapsed: Duration) -> FetchError {
    if stderr.contains("Authentication failed")
        || stderr.contains("could not read Username")
        || stderr.contains("Permission denied")
    {
        FetchError::Authentication {
            url: url.to_string(),
            elapsed,
        }
    } else if stderr.contains("Repository not found") {
        FetchError::RepositoryNotFound {
            url: url.to_string(),
            elapsed,
        }
    } else if stderr.contains("could not find remote ref")
        || (stderr.contains("Remote branch") && stderr.contains("not found"))
    {
        FetchError::BranchNotFound {
            branch: branch.to_string(),
            elapsed,
        }
    } else if stderr.contains("Host key verification failed") {
        FetchError::HostKeyVerification {
            url: url.to_string(),
        }
    } else {
        let message = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| "git exited without an error message".to_string());
        FetchError::Generic { message, elapsed }
    }
}

/// Which pipe a relayed line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn label(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// Forwards subprocess output to the console.
///
/// Verbose mode shows every line tagged with its stream; otherwise only
/// progress lines are shown.
#[derive(Debug, Clone)]
pub struct OutputRelay {
    reporter: Reporter,
}

impl OutputRelay {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    pub fn relay(&self, stream: Stream, line: &str) {
        if self.reporter.is_verbose() {
            self.reporter.line(format!("git {}: {}", stream.label(), line));
        } else if is_progress_line(line) {
            let marker = emoji(self.reporter.config(), "📦", " ");
            self.reporter.line(format!("{} {}", marker, line.trim()));
        }
    }
}

/// Result of running a subprocess to completion or timeout.
#[derive(Debug)]
pub enum RunOutcome {
    Success {
        elapsed: Duration,
    },
    Failed {
        status: ExitStatus,
        stderr: String,
        elapsed: Duration,
    },
    TimedOut {
        elapsed: Duration,
    },
}

/// Run `cmd` with piped output, relaying lines until it exits or `timeout`
/// expires.
pub fn run_streaming(cmd: Command, timeout: Duration, relay: &OutputRelay) -> io::Result<RunOutcome> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_streaming_async(cmd, timeout, relay.clone()))
}

async fn run_streaming_async(
    mut cmd: Command,
    timeout: Duration,
    relay: OutputRelay,
) -> io::Result<RunOutcome> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let mut child = cmd.spawn()?;

    let stdout_text = Arc::new(Mutex::new(String::new()));
    let stderr_text = Arc::new(Mutex::new(String::new()));
    let mut tasks = Vec::new();
    if let Some(pipe) = child.stdout.take() {
        tasks.push(tokio::spawn(drain(
            pipe,
            Stream::Stdout,
            relay.clone(),
            Arc::clone(&stdout_text),
        )));
    }
    if let Some(pipe) = child.stderr.take() {
        tasks.push(tokio::spawn(drain(
            pipe,
            Stream::Stderr,
            relay.clone(),
            Arc::clone(&stderr_text),
        )));
    }

    let waited = tokio::time::timeout(timeout, child.wait()).await;

    let status = match waited {
        Ok(status) => status?,
        Err(_) => {
            if let Err(e) = child.kill().await {
                log::warn!("failed to kill timed out process: {}", e);
            }
            for task in &tasks {
                task.abort();
            }
            return Ok(RunOutcome::TimedOut {
                elapsed: start.elapsed(),
            });
        }
    };

    let grace = timeout.saturating_sub(start.elapsed()).min(DRAIN_GRACE);
    let drained = tokio::time::timeout(grace, async {
        for task in tasks.iter_mut() {
            let _ = task.await;
        }
    })
    .await;
    if drained.is_err() {
        log::debug!("output pipes still open after exit, no longer reading them");
        for task in &tasks {
            task.abort();
        }
    }

    let stderr = stderr_text
        .lock()
        .map(|text| text.clone())
        .unwrap_or_default();
    let elapsed = start.elapsed();

    if status.success() {
        Ok(RunOutcome::Success { elapsed })
    } else {
        Ok(RunOutcome::Failed {
            status,
            stderr,
            elapsed,
        })
    }
}

/// Read `reader` to the end, relaying each line and appending it to
/// `captured`.
///
/// Git redraws progress with carriage returns, so only the last segment of a
/// `\r`-separated line is relayed.
async fn drain<R>(reader: R, stream: Stream, relay: OutputRelay, captured: Arc<Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut segments = BufReader::new(reader).split(b'\n');

    loop {
        match segments.next_segment().await {
            Ok(Some(bytes)) => {
                let text = String::from_utf8_lossy(&bytes);
                if let Some(line) = text.split('\r').rev().find(|s| !s.trim().is_empty()) {
                    relay.relay(stream, line.trim_end());
                }
                if let Ok(mut captured) = captured.lock() {
                    captured.push_str(&text);
                    captured.push('\n');
                }
            }
            Ok(None) => break,
            Err(e) => {
                log::debug!("error reading git {}: {}", stream.label(), e);
                break;
            }
        }
    }
}

/// Shallow-clone `url` into `target_dir`, bounded by `timeout`.
///
/// `target_dir` must not exist or must be empty.
pub fn clone_shallow(
    url: &str,
    branch: &str,
    target_dir: &Path,
    timeout: Duration,
    relay: &OutputRelay,
) -> Result<(), FetchError> {
    let args = clone_args(url, branch, target_dir);
    log::debug!(
        "running: git {}",
        args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    let mut cmd = Command::new("git");
    cmd.args(&args);

    match run_streaming(cmd, timeout, relay) {
        Ok(RunOutcome::Success { elapsed }) => {
            log::info!("cloned {} in {:.2}s", url, elapsed.as_secs_f64());
            Ok(())
        }
        Ok(RunOutcome::Failed {
            status,
            stderr,
            elapsed,
        }) => {
            log::debug!("git clone exited with {}: {}", status, stderr.trim());
            Err(classify_failure(&stderr, url, branch, elapsed))
        }
        Ok(RunOutcome::TimedOut { elapsed }) => Err(FetchError::Timeout { elapsed }),
        Err(e) => Err(FetchError::Generic {
            message: format!("failed to start git: {}", e),
            elapsed: Duration::ZERO,
        }),
    }
}
