//! Mirror Sync
//!
//! Reconciles a set of tracked files and directories between a local root
//! and its library-side mirror. Two boundaries use it:
//!
//! - a project root and `projects/<name>/` (`CLAUDE.md` plus `.claude/`)
//! - `~/.claude` and `global/` (`CLAUDE.md` plus `rules/` and `skills/`)
//!
//! Push and pull replace tracked directories wholesale on the receiving
//! side. Replacement is not atomic; an interrupted run is recovered by
//! running it again.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::domain::entities::LocalConfig;
use crate::domain::ports::FileSystem;
use crate::domain::services::{classify, DiffResult};
use crate::environment::{Environment, CLAUDE_DIR, CONTEXT_FILE, RULES_DIR, SKILLS_DIR};
use crate::error::ContextmarkResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::YamlConfigRepository;
use crate::infrastructure::scanner::project_name;

/// Which boundary a tracked set describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorScope {
    Project { name: String },
    Global,
}

impl MirrorScope {
    fn nothing_to_push(&self) -> String {
        match self {
            MirrorScope::Project { .. } => {
                "No files to push (no CLAUDE.md or .claude/ found)".to_string()
            }
            MirrorScope::Global => "No global config found in ~/.claude/".to_string(),
        }
    }

    fn pushed(&self, count: usize) -> String {
        match self {
            MirrorScope::Project { .. } => format!("Pushed {} file(s) to library", count),
            MirrorScope::Global => format!("Pushed {} global file(s) to library", count),
        }
    }

    fn pulled(&self, count: usize) -> String {
        match self {
            MirrorScope::Project { .. } => format!("Pulled {} file(s) from library", count),
            MirrorScope::Global => format!("Pulled {} global file(s) from library", count),
        }
    }
}

/// Files and directories tracked across one boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSet {
    pub local_root: PathBuf,
    pub library_root: PathBuf,
    /// Single files, relative to both roots
    pub files: Vec<String>,
    /// Directory trees, relative to both roots
    pub dirs: Vec<String>,
    pub scope: MirrorScope,
}

impl TrackedSet {
    pub fn project(env: &Environment, project_dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local_root: project_dir.to_path_buf(),
            library_root: env.library().project_dir(&name),
            files: vec![CONTEXT_FILE.to_string()],
            dirs: vec![CLAUDE_DIR.to_string()],
            scope: MirrorScope::Project { name },
        }
    }

    pub fn global(env: &Environment) -> Self {
        Self {
            local_root: env.user_claude_dir(),
            library_root: env.library().global_dir(),
            files: vec![CONTEXT_FILE.to_string()],
            dirs: vec![RULES_DIR.to_string(), SKILLS_DIR.to_string()],
            scope: MirrorScope::Global,
        }
    }

    /// Same set with the two roots exchanged
    pub fn swapped(&self) -> Self {
        Self {
            local_root: self.library_root.clone(),
            library_root: self.local_root.clone(),
            ..self.clone()
        }
    }
}

/// Outcome of a push or pull
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    /// Relative paths written, one per file
    pub files_changed: Vec<String>,
    pub message: String,
}

impl SyncResult {
    fn failed(message: String) -> Self {
        Self {
            success: false,
            files_changed: Vec::new(),
            message,
        }
    }
}

pub struct MirrorSync<F: FileSystem = LocalFs> {
    fs: F,
}

impl MirrorSync<LocalFs> {
    pub fn new() -> Self {
        Self::with_fs(LocalFs::new())
    }
}

impl Default for MirrorSync<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> MirrorSync<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn read_optional(&self, path: &Path) -> ContextmarkResult<Option<Vec<u8>>> {
        if !self.fs.exists(path) || self.fs.is_dir(path) {
            return Ok(None);
        }
        Ok(Some(self.fs.read_bytes(path)?))
    }

    /// Files under `dir` as `/`-separated relative paths, sorted.
    fn relative_files(&self, dir: &Path) -> ContextmarkResult<BTreeSet<String>> {
        if !self.fs.is_dir(dir) {
            return Ok(BTreeSet::new());
        }
        Ok(self
            .fs
            .list_files_recursive(dir, None)?
            .into_iter()
            .filter_map(|path| {
                let relative = path.strip_prefix(dir).ok()?;
                let segments: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                Some(segments.join("/"))
            })
            .collect())
    }

    pub fn diff(&self, set: &TrackedSet) -> ContextmarkResult<DiffResult> {
        let mut result = DiffResult::default();

        for file in &set.files {
            let local = self.read_optional(&set.local_root.join(file))?;
            let library = self.read_optional(&set.library_root.join(file))?;
            result.record(file.as_str(), classify(local.as_deref(), library.as_deref()));
        }

        for dir in &set.dirs {
            let local_dir = set.local_root.join(dir);
            let library_dir = set.library_root.join(dir);
            let mut relatives = self.relative_files(&local_dir)?;
            relatives.extend(self.relative_files(&library_dir)?);

            for relative in relatives {
                let local = self.read_optional(&local_dir.join(&relative))?;
                let library = self.read_optional(&library_dir.join(&relative))?;
                let comparison = classify(local.as_deref(), library.as_deref());
                tracing::trace!(path = %relative, ?comparison, "compared");
                result.record(format!("{}/{}", dir, relative), comparison);
            }
        }

        Ok(result.finish())
    }

    /// Copy everything tracked that exists under `from` into `to`.
    fn transfer(&self, from: &Path, to: &Path, set: &TrackedSet) -> ContextmarkResult<Vec<String>> {
        let mut changed = Vec::new();

        for file in &set.files {
            let source = from.join(file);
            if self.fs.exists(&source) && !self.fs.is_dir(&source) {
                self.fs.copy(&source, &to.join(file))?;
                changed.push(file.clone());
            }
        }

        for dir in &set.dirs {
            let source_dir = from.join(dir);
            if !self.fs.is_dir(&source_dir) {
                continue;
            }
            let dest_dir = to.join(dir);
            if self.fs.exists(&dest_dir) {
                self.fs.remove_dir_all(&dest_dir)?;
            }
            self.fs.create_dir_all(&dest_dir)?;

            for relative in self.relative_files(&source_dir)? {
                self.fs
                    .copy(&source_dir.join(&relative), &dest_dir.join(&relative))?;
                tracing::debug!(dest = %dest_dir.display(), file = %relative, "copied");
                changed.push(format!("{}/{}", dir, relative));
            }
        }

        Ok(changed)
    }

    /// Local side wins. Tracked roots missing locally are left alone in the library.
    pub fn push(&self, set: &TrackedSet) -> ContextmarkResult<SyncResult> {
        self.fs.create_dir_all(&set.library_root)?;
        let files_changed = self.transfer(&set.local_root, &set.library_root, set)?;

        let message = if files_changed.is_empty() {
            set.scope.nothing_to_push()
        } else {
            set.scope.pushed(files_changed.len())
        };
        tracing::info!(files = files_changed.len(), "push: {}", message);

        Ok(SyncResult {
            success: true,
            files_changed,
            message,
        })
    }

    /// Library side wins. A mirror that was never pushed is `success: false`.
    pub fn pull(&self, set: &TrackedSet) -> ContextmarkResult<SyncResult> {
        match &set.scope {
            MirrorScope::Project { name } => {
                if !self.fs.is_dir(&set.library_root) {
                    return Ok(SyncResult::failed(format!(
                        "Project \"{}\" not found in library. Run 'contextmark push' first.",
                        name
                    )));
                }
            }
            MirrorScope::Global => self.fs.create_dir_all(&set.local_root)?,
        }

        let files_changed = self.transfer(&set.library_root, &set.local_root, set)?;

        if files_changed.is_empty() {
            return Ok(match set.scope {
                MirrorScope::Project { .. } => SyncResult {
                    success: true,
                    files_changed,
                    message: "No files to pull from library".to_string(),
                },
                MirrorScope::Global => SyncResult::failed(
                    "No global config found in library. Run 'contextmark push --global' first."
                        .to_string(),
                ),
            });
        }

        let message = set.scope.pulled(files_changed.len());
        tracing::info!(files = files_changed.len(), "pull: {}", message);
        Ok(SyncResult {
            success: true,
            files_changed,
            message,
        })
    }
}

/// Whether a project has a library mirror, and how it compares
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSyncStatus {
    pub project_name: String,
    pub exists_in_library: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
}

impl ProjectSyncStatus {
    pub fn has_diff(&self) -> bool {
        self.diff.as_ref().is_some_and(|d| d.has_diff)
    }
}

/// Project and global mirror operations bound to an [`Environment`]
pub struct MirrorUseCase<F: FileSystem + Clone = LocalFs> {
    env: Environment,
    fs: F,
    configs: YamlConfigRepository<F>,
    sync: MirrorSync<F>,
}

impl MirrorUseCase<LocalFs> {
    pub fn new(env: Environment) -> Self {
        Self::with_fs(env, LocalFs::new())
    }
}

impl<F: FileSystem + Clone> MirrorUseCase<F> {
    pub fn with_fs(env: Environment, fs: F) -> Self {
        Self {
            configs: YamlConfigRepository::with_fs(fs.clone()),
            sync: MirrorSync::with_fs(fs.clone()),
            env,
            fs,
        }
    }

    pub fn project_set(&self, project_dir: &Path) -> TrackedSet {
        TrackedSet::project(&self.env, project_dir, project_name(&self.fs, project_dir))
    }

    /// Stamp the project's ledger, if it has one.
    fn stamp(
        &self,
        project_dir: &Path,
        update: impl FnOnce(&mut LocalConfig),
    ) -> ContextmarkResult<()> {
        if let Some(mut config) = self.configs.load_local(project_dir)? {
            update(&mut config);
            self.configs.save_local(project_dir, &config)?;
        }
        Ok(())
    }

    pub fn diff_project(&self, project_dir: &Path) -> ContextmarkResult<DiffResult> {
        self.env.require_library()?;
        self.sync.diff(&self.project_set(project_dir))
    }

    pub fn diff_global(&self) -> ContextmarkResult<DiffResult> {
        self.env.require_library()?;
        self.sync.diff(&TrackedSet::global(&self.env))
    }

    pub fn push_project(&self, project_dir: &Path) -> ContextmarkResult<SyncResult> {
        self.env.require_library()?;
        let result = self.sync.push(&self.project_set(project_dir))?;
        if !result.files_changed.is_empty() {
            self.stamp(project_dir, |c| c.last_push = Some(Utc::now()))?;
        }
        Ok(result)
    }

    pub fn pull_project(&self, project_dir: &Path) -> ContextmarkResult<SyncResult> {
        self.env.require_library()?;
        let result = self.sync.pull(&self.project_set(project_dir))?;
        if result.success && !result.files_changed.is_empty() {
            self.stamp(project_dir, |c| c.last_pull = Some(Utc::now()))?;
        }
        Ok(result)
    }

    pub fn push_global(&self) -> ContextmarkResult<SyncResult> {
        self.env.require_library()?;
        self.sync.push(&TrackedSet::global(&self.env))
    }

    pub fn pull_global(&self) -> ContextmarkResult<SyncResult> {
        self.env.require_library()?;
        self.sync.pull(&TrackedSet::global(&self.env))
    }

    pub fn project_sync_status(&self, project_dir: &Path) -> ContextmarkResult<ProjectSyncStatus> {
        self.env.require_library()?;
        let set = self.project_set(project_dir);
        let project_name = match &set.scope {
            MirrorScope::Project { name } => name.clone(),
            MirrorScope::Global => String::new(),
        };

        if !self.fs.is_dir(&set.library_root) {
            return Ok(ProjectSyncStatus {
                project_name,
                exists_in_library: false,
                diff: None,
            });
        }

        Ok(ProjectSyncStatus {
            project_name,
            exists_in_library: true,
            diff: Some(self.sync.diff(&set)?),
        })
    }

    /// Names of mirrored projects, sorted.
    pub fn list_library_projects(&self) -> ContextmarkResult<Vec<String>> {
        let mut names: Vec<String> = self
            .fs
            .list_dirs(&self.env.library().projects_dir())?
            .iter()
            .filter_map(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }
}
