//! Custom assertion macros with descriptive failure messages.

use std::path::Path;

/// List all files under a directory recursively (for failure messages)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files.sort();
    files
}

/// Assert that a path exists, listing what does exist otherwise.
///
/// # Example
/// ```ignore
/// assert_exists!(lib.project_path("CLAUDE.md"));
/// ```
#[macro_export]
macro_rules! assert_exists {
    ($path:expr) => {
        let path = std::path::PathBuf::from($path);
        assert!(
            path.exists(),
            "Expected '{}' to exist.\nSiblings:\n  {}",
            path.display(),
            $crate::common::list_all_files(path.parent().unwrap_or(&path)).join("\n  ")
        );
    };
}

/// Assert that stdout or stderr contains a pattern.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\nstdout:\n{}\nstderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}
