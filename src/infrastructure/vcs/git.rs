//! Git CLI VcsClient
//!
//! Runs the `git` binary inside the library directory. Failures surface as
//! `Transport` errors carrying git's stderr unchanged.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

use crate::domain::ports::{VcsClient, VcsStatus};
use crate::error::{ContextmarkError, ContextmarkResult};

/// Default bound on the ahead/behind fetch probe
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct GitCli {
    repo_dir: PathBuf,
    fetch_timeout: Duration,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            fetch_timeout: FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Check if git is installed and available
    pub fn check_available() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.repo_dir).stdin(Stdio::null());
        cmd
    }

    fn output(&self, args: &[&str]) -> ContextmarkResult<Output> {
        self.command(args)
            .output()
            .map_err(|e| ContextmarkError::transport(git_operation(args), e.to_string()))
    }

    /// Run git and return trimmed stdout, or a `Transport` error with stderr.
    fn run(&self, args: &[&str]) -> ContextmarkResult<String> {
        Ok(self.run_untrimmed(args)?.trim().to_string())
    }

    fn run_untrimmed(&self, args: &[&str]) -> ContextmarkResult<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exit code {:?}", output.status.code())
            } else {
                stderr
            };
            return Err(ContextmarkError::transport(git_operation(args), message));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git and report only whether it succeeded.
    fn succeeds(&self, args: &[&str]) -> bool {
        self.command(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// `git fetch`, killed after the timeout. Returns whether it completed successfully.
    fn fetch_with_timeout(&self) -> bool {
        let mut child = match self
            .command(&["fetch", "--quiet"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("could not start git fetch: {}", e);
                return false;
            }
        };

        let deadline = Instant::now() + self.fetch_timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    if !status.success() {
                        tracing::warn!("git fetch failed, ahead/behind unknown");
                    }
                    return status.success();
                }
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(
                        "git fetch timed out after {}s, ahead/behind unknown",
                        self.fetch_timeout.as_secs()
                    );
                    return false;
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    tracing::warn!("git fetch wait failed: {}", e);
                    return false;
                }
            }
        }
    }

    /// `(ahead, behind)` against `origin/<branch>`, zero when unknown.
    fn ahead_behind(&self, branch: &str) -> (usize, usize) {
        if !self.fetch_with_timeout() {
            return (0, 0);
        }
        let range = format!("origin/{}...HEAD", branch);
        match self.run(&["rev-list", "--left-right", "--count", &range]) {
            Ok(counts) => parse_left_right(&counts).unwrap_or((0, 0)),
            Err(e) => {
                tracing::debug!("no tracking branch for ahead/behind: {}", e);
                (0, 0)
            }
        }
    }
}

fn git_operation(args: &[&str]) -> String {
    match args.first() {
        Some(sub) => format!("git {}", sub),
        None => "git".to_string(),
    }
}

/// Parse `rev-list --left-right --count remote...HEAD` output (`behind\tahead`).
fn parse_left_right(counts: &str) -> Option<(usize, usize)> {
    let mut parts = counts.split_whitespace();
    let behind = parts.next()?.parse().ok()?;
    let ahead = parts.next()?.parse().ok()?;
    Some((ahead, behind))
}

/// Paths from `git status --porcelain`
fn parse_porcelain(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| line[3..].to_string())
        .collect()
}

impl VcsClient for GitCli {
    fn is_repo(&self) -> bool {
        self.repo_dir.join(".git").exists()
    }

    fn init(&self) -> ContextmarkResult<()> {
        self.run(&["init"])?;
        Ok(())
    }

    fn remote(&self) -> ContextmarkResult<Option<String>> {
        let output = self.output(&["remote", "get-url", "origin"])?;
        if !output.status.success() {
            return Ok(None);
        }
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!url.is_empty()).then_some(url))
    }

    fn set_remote(&self, url: &str) -> ContextmarkResult<()> {
        if self.remote()?.is_some() {
            self.run(&["remote", "set-url", "origin", url])?;
        } else {
            self.run(&["remote", "add", "origin", url])?;
        }
        Ok(())
    }

    fn current_branch(&self) -> ContextmarkResult<String> {
        let branch = self.run(&["branch", "--show-current"])?;
        if branch.is_empty() {
            // detached HEAD or unborn branch on old git
            return self.run(&["rev-parse", "--abbrev-ref", "HEAD"]);
        }
        Ok(branch)
    }

    fn has_commits(&self) -> bool {
        self.succeeds(&["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    fn status(&self) -> ContextmarkResult<VcsStatus> {
        // leading status columns are significant, so no trimming
        let porcelain = self.run_untrimmed(&["status", "--porcelain"])?;
        let changed_files = parse_porcelain(&porcelain);

        let (ahead, behind) = if self.remote()?.is_some() && self.has_commits() {
            let branch = self.current_branch()?;
            self.ahead_behind(&branch)
        } else {
            (0, 0)
        };

        Ok(VcsStatus {
            has_changes: !changed_files.is_empty(),
            changed_files,
            ahead,
            behind,
        })
    }

    fn commit(&self, message: &str) -> ContextmarkResult<()> {
        self.run(&["add", "-A"])?;
        self.run(&["commit", "-m", message])?;
        tracing::info!("committed library changes: {}", message);
        Ok(())
    }

    fn push(&self) -> ContextmarkResult<()> {
        let branch = self.current_branch()?;
        self.run(&["push", "-u", "origin", &branch])?;
        tracing::info!(branch = %branch, "pushed library");
        Ok(())
    }

    fn pull(&self) -> ContextmarkResult<()> {
        let branch = self.current_branch()?;
        self.run(&["pull", "origin", &branch])?;
        tracing::info!(branch = %branch, "pulled library");
        Ok(())
    }
}
