//! Remote Sync Use Case
//!
//! Keeps the library directory itself in sync with a remote repository
//! through a [`VcsClient`]. Transport failures surface as
//! `ContextmarkError::Transport` with the tool's message; "not configured"
//! and "nothing to do" are outcomes.

use serde::Serialize;

use crate::domain::entities::SyncMethod;
use crate::domain::ports::{FileSystem, VcsClient};
use crate::environment::Environment;
use crate::error::ContextmarkResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::YamlConfigRepository;

/// Commit message used when the caller gives none
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update context library";

const INITIAL_COMMIT_MESSAGE: &str = "Initial context library";

/// Why a remote operation cannot run yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotConfigured {
    NotARepo,
    NoRemote,
}

impl std::fmt::Display for NotConfigured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotConfigured::NotARepo => write!(
                f,
                "Library is not a Git repository. Run 'contextmark sync setup <remote>' first."
            ),
            NotConfigured::NoRemote => write!(
                f,
                "No remote configured. Run 'contextmark sync setup <remote>' first."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    pub initialized_repo: bool,
    /// `origin` before setup, when one was configured
    pub previous_remote: Option<String>,
    pub initial_commit: bool,
    pub pushed: bool,
    /// Why the initial push failed, typically a remote that does not exist yet
    pub push_hint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteStatus {
    pub is_repo: bool,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub ahead: usize,
    pub behind: usize,
    pub has_changes: bool,
    pub changed_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    NotConfigured(NotConfigured),
    NothingToPush,
    Pushed {
        /// Message of the commit made before pushing, if any
        committed: Option<String>,
        ahead: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    NotConfigured(NotConfigured),
    UpToDate { uncommitted_changes: bool },
    Pulled { behind: usize, uncommitted_changes: bool },
}

pub struct RemoteSyncUseCase<V: VcsClient, F: FileSystem + Clone = LocalFs> {
    env: Environment,
    vcs: V,
    configs: YamlConfigRepository<F>,
}

impl<V: VcsClient> RemoteSyncUseCase<V, LocalFs> {
    pub fn new(env: Environment, vcs: V) -> Self {
        Self::with_fs(env, vcs, LocalFs::new())
    }
}

impl<V: VcsClient, F: FileSystem + Clone> RemoteSyncUseCase<V, F> {
    pub fn with_fs(env: Environment, vcs: V, fs: F) -> Self {
        Self {
            env,
            vcs,
            configs: YamlConfigRepository::with_fs(fs),
        }
    }

    fn configured(&self) -> ContextmarkResult<Result<String, NotConfigured>> {
        if !self.vcs.is_repo() {
            return Ok(Err(NotConfigured::NotARepo));
        }
        Ok(self.vcs.remote()?.ok_or(NotConfigured::NoRemote))
    }

    /// Point the library at `remote`, creating the repository if needed.
    pub fn setup(&self, remote: &str) -> ContextmarkResult<SetupOutcome> {
        self.env.require_library()?;

        let initialized_repo = !self.vcs.is_repo();
        if initialized_repo {
            self.vcs.init()?;
        }
        let previous_remote = self.vcs.remote()?;
        self.vcs.set_remote(remote)?;

        let config_file = self.env.library().config_file();
        let mut config = self.configs.load_global_or_default(&config_file)?;
        config.sync.method = SyncMethod::Git;
        config.sync.remote = Some(remote.to_string());
        self.configs.save_global(&config_file, &config)?;

        let mut outcome = SetupOutcome {
            initialized_repo,
            previous_remote,
            initial_commit: false,
            pushed: false,
            push_hint: None,
        };

        if !self.vcs.has_commits() {
            self.vcs.commit(INITIAL_COMMIT_MESSAGE)?;
            outcome.initial_commit = true;
            match self.vcs.push() {
                Ok(()) => outcome.pushed = true,
                Err(e) => {
                    tracing::warn!("initial push failed: {}", e);
                    outcome.push_hint = Some(e.to_string());
                }
            }
        }

        tracing::info!(remote, "sync configured");
        Ok(outcome)
    }

    pub fn status(&self) -> ContextmarkResult<RemoteStatus> {
        self.env.require_library()?;
        if !self.vcs.is_repo() {
            return Ok(RemoteStatus::default());
        }

        let vcs_status = self.vcs.status()?;
        Ok(RemoteStatus {
            is_repo: true,
            remote: self.vcs.remote()?,
            branch: self.vcs.current_branch().ok(),
            ahead: vcs_status.ahead,
            behind: vcs_status.behind,
            has_changes: vcs_status.has_changes,
            changed_files: vcs_status.changed_files,
        })
    }

    /// Commit local changes if any, then push.
    ///
    /// A fresh commit is pushed even when the tracking branch cannot be
    /// compared yet (first push of a new branch).
    pub fn push(&self, message: Option<&str>) -> ContextmarkResult<PushOutcome> {
        self.env.require_library()?;
        if let Err(reason) = self.configured()? {
            return Ok(PushOutcome::NotConfigured(reason));
        }

        let mut committed = None;
        if self.vcs.status()?.has_changes {
            let message = message.unwrap_or(DEFAULT_COMMIT_MESSAGE);
            self.vcs.commit(message)?;
            committed = Some(message.to_string());
        }

        let ahead = self.vcs.status()?.ahead;
        if committed.is_none() && ahead == 0 {
            return Ok(PushOutcome::NothingToPush);
        }

        self.vcs.push()?;
        tracing::info!(ahead, "pushed library");
        Ok(PushOutcome::Pushed { committed, ahead })
    }

    /// Pull when the remote is ahead. Uncommitted changes are flagged, not refused.
    pub fn pull(&self) -> ContextmarkResult<PullOutcome> {
        self.env.require_library()?;
        if let Err(reason) = self.configured()? {
            return Ok(PullOutcome::NotConfigured(reason));
        }

        let status = self.vcs.status()?;
        let uncommitted_changes = status.has_changes;
        if uncommitted_changes {
            tracing::warn!("library has uncommitted changes");
        }

        if status.behind == 0 {
            return Ok(PullOutcome::UpToDate {
                uncommitted_changes,
            });
        }

        self.vcs.pull()?;
        tracing::info!(behind = status.behind, "pulled library");
        Ok(PullOutcome::Pulled {
            behind: status.behind,
            uncommitted_changes,
        })
    }
}
