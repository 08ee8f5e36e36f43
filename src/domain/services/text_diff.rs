//! Line diffs for files that differ across a sync boundary

use similar::{ChangeTag, TextDiff};

/// Added and removed line counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineChanges {
    pub additions: usize,
    pub deletions: usize,
}

impl LineChanges {
    /// e.g. "+5, -3"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

pub fn line_changes(old: &str, new: &str) -> LineChanges {
    let diff = TextDiff::from_lines(old, new);
    let mut changes = LineChanges::default();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => changes.deletions += 1,
            ChangeTag::Insert => changes.additions += 1,
            ChangeTag::Equal => {}
        }
    }
    changes
}

/// Unified diff from `old` (labelled `old_label`) to `new`.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string()
}
