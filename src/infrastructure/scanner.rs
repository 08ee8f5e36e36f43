//! Project discovery
//!
//! Finds directories tracked by ContextMark (those holding `.contextmark.yml`)
//! and derives a project's library name from its manifest.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::domain::ports::FileSystem;
use crate::environment::LOCAL_CONFIG_FILE;

/// Upper bound on projects returned by one scan
pub const MAX_PROJECTS: usize = 100;

const MAX_DEPTH: usize = 6;

const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "vendor", ".git"];

/// Library name for a project directory.
///
/// `package.json` then `composer.json` `name` (the part after `/` for
/// scoped or vendor names), else the directory basename.
pub fn project_name<F: FileSystem>(fs: &F, project_dir: &Path) -> String {
    for manifest in ["package.json", "composer.json"] {
        if let Some(name) = manifest_name(fs, &project_dir.join(manifest)) {
            return name;
        }
    }

    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

fn manifest_name<F: FileSystem>(fs: &F, path: &Path) -> Option<String> {
    if !fs.exists(path) {
        return None;
    }
    let content = fs.read(path).ok()?;
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("ignoring unparsable {}: {}", path.display(), e);
            return None;
        }
    };
    let name = value.get("name")?.as_str()?;
    let short = name.rsplit('/').next().unwrap_or(name).trim();
    (!short.is_empty()).then(|| short.to_string())
}

/// Walks a directory tree for tracked projects.
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    excluded: Vec<PathBuf>,
    max_depth: usize,
    limit: usize,
}

impl Default for ProjectScanner {
    fn default() -> Self {
        Self {
            excluded: Vec::new(),
            max_depth: MAX_DEPTH,
            limit: MAX_PROJECTS,
        }
    }
}

impl ProjectScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never descend into `dir` (used for the library root).
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Tracked project directories under `root`, sorted, at most `limit`.
    pub fn scan(&self, root: &Path) -> Vec<PathBuf> {
        let excluded = self.excluded.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .max_depth(Some(self.max_depth))
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    return true;
                }
                let skipped_name = entry
                    .file_name()
                    .to_str()
                    .map(|n| SKIPPED_DIRS.contains(&n))
                    .unwrap_or(false);
                !skipped_name && !excluded.iter().any(|x| entry.path() == x)
            })
            .build();

        let mut projects = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("scan: {}", e);
                    continue;
                }
            };
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file && entry.file_name() == OsStr::new(LOCAL_CONFIG_FILE) {
                if let Some(parent) = entry.path().parent() {
                    projects.push(parent.to_path_buf());
                }
                if projects.len() >= self.limit {
                    tracing::warn!("stopped scanning after {} projects", self.limit);
                    break;
                }
            }
        }

        projects.sort();
        projects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::LocalFs;
    use tempfile::tempdir;

    fn track(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(LOCAL_CONFIG_FILE), "project: x\n").unwrap();
    }

    #[test]
    fn name_from_scoped_package_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name": "@acme/web-app"}"#).unwrap();

        assert_eq!(project_name(&LocalFs::new(), dir.path()), "web-app");
    }

    #[test]
    fn name_from_composer_json_vendor() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("composer.json"), r#"{"name": "acme/billing"}"#).unwrap();

        assert_eq!(project_name(&LocalFs::new(), dir.path()), "billing");
    }

    #[test]
    fn name_falls_back_to_basename() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("my-service");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join("package.json"), "not json").unwrap();

        assert_eq!(project_name(&LocalFs::new(), &project), "my-service");
    }

    #[test]
    fn scan_finds_tracked_projects_and_skips_noise() {
        let dir = tempdir().unwrap();
        track(&dir.path().join("b-app"));
        track(&dir.path().join("a-app"));
        track(&dir.path().join("a-app/node_modules/dep"));
        track(&dir.path().join(".contextmark/projects/a-app"));
        std::fs::create_dir_all(dir.path().join("untracked")).unwrap();

        let projects = ProjectScanner::new()
            .excluding(dir.path().join(".contextmark"))
            .scan(dir.path());

        assert_eq!(
            projects,
            vec![dir.path().join("a-app"), dir.path().join("b-app")]
        );
    }

    #[test]
    fn scan_respects_limit() {
        let dir = tempdir().unwrap();
        for i in 0..5 {
            track(&dir.path().join(format!("p{}", i)));
        }

        let projects = ProjectScanner::new().with_limit(3).scan(dir.path());
        assert_eq!(projects.len(), 3);
    }
}
