//! Four-way file partition for mirror sync
//!
//! Every relative path found on either side of a sync boundary lands in
//! exactly one of `local_only`, `library_only`, `different`, `identical`.

use serde::Serialize;

/// Comparison of one relative path across the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileComparison {
    LocalOnly,
    LibraryOnly,
    Different,
    Identical,
    /// Neither side has the file; not recorded
    Absent,
}

/// Classify a path from the raw bytes on each side.
pub fn classify(local: Option<&[u8]>, library: Option<&[u8]>) -> FileComparison {
    match (local, library) {
        (Some(l), Some(r)) if l == r => FileComparison::Identical,
        (Some(_), Some(_)) => FileComparison::Different,
        (Some(_), None) => FileComparison::LocalOnly,
        (None, Some(_)) => FileComparison::LibraryOnly,
        (None, None) => FileComparison::Absent,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub has_diff: bool,
    pub local_only: Vec<String>,
    pub library_only: Vec<String>,
    pub different: Vec<String>,
    pub identical: Vec<String>,
}

/// What a diff means to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Neither side has any tracked content
    NotSynced,
    InSync,
    OutOfSync,
}

impl DiffResult {
    pub fn record(&mut self, path: impl Into<String>, comparison: FileComparison) {
        let bucket = match comparison {
            FileComparison::LocalOnly => &mut self.local_only,
            FileComparison::LibraryOnly => &mut self.library_only,
            FileComparison::Different => &mut self.different,
            FileComparison::Identical => &mut self.identical,
            FileComparison::Absent => return,
        };
        bucket.push(path.into());
    }

    /// Sort every list and compute `has_diff`.
    pub fn finish(mut self) -> Self {
        self.local_only.sort();
        self.library_only.sort();
        self.different.sort();
        self.identical.sort();
        self.has_diff = !self.local_only.is_empty()
            || !self.library_only.is_empty()
            || !self.different.is_empty();
        self
    }

    /// Number of distinct paths compared
    pub fn total(&self) -> usize {
        self.local_only.len()
            + self.library_only.len()
            + self.different.len()
            + self.identical.len()
    }

    pub fn state(&self) -> SyncState {
        if self.total() == 0 {
            SyncState::NotSynced
        } else if self.has_diff {
            SyncState::OutOfSync
        } else {
            SyncState::InSync
        }
    }
}
