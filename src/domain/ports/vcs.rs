//! VcsClient port - remote transport for the library directory
//!
//! All operations block until the underlying tool finishes. Failures are
//! `ContextmarkError::Transport` carrying the tool's own message.

use crate::error::ContextmarkResult;

/// Working tree and tracking-branch state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcsStatus {
    pub has_changes: bool,
    pub changed_files: Vec<String>,
    /// Commits not yet on the remote. Zero when the remote could not be reached.
    pub ahead: usize,
    /// Commits on the remote not yet local. Zero when the remote could not be reached.
    pub behind: usize,
}

pub trait VcsClient {
    fn is_repo(&self) -> bool;
    fn init(&self) -> ContextmarkResult<()>;
    fn remote(&self) -> ContextmarkResult<Option<String>>;
    /// Add or replace `origin`.
    fn set_remote(&self, url: &str) -> ContextmarkResult<()>;
    fn current_branch(&self) -> ContextmarkResult<String>;
    fn has_commits(&self) -> bool;
    /// Includes a fetch probe for ahead/behind that must not fail the call.
    fn status(&self) -> ContextmarkResult<VcsStatus>;
    /// Stage everything and commit.
    fn commit(&self, message: &str) -> ContextmarkResult<()>;
    fn push(&self) -> ContextmarkResult<()>;
    fn pull(&self) -> ContextmarkResult<()>;
}
