//! Project ledger operations
//!
//! Drift reporting and the small edits a user makes to a tracked project:
//! adding or removing a block reference, installing an agent or command.

use std::path::{Path, PathBuf};

use crate::domain::entities::{BlockReference, LocalConfig, SnippetKind};
use crate::domain::ports::{ContentStore, FileSystem};
use crate::domain::services::{self, UpdateStatus};
use crate::domain::value_objects::{validate_block_slug, validate_entity_slug};
use crate::environment::{Environment, CLAUDE_DIR};
use crate::error::ContextmarkResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::{FsContentStore, YamlConfigRepository};

/// Ledger plus its drift against the library
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDrift {
    pub config: LocalConfig,
    pub statuses: Vec<UpdateStatus>,
}

impl ProjectDrift {
    pub fn needs_update(&self) -> bool {
        services::needs_update(&self.statuses)
    }

    pub fn outdated(&self) -> Vec<&UpdateStatus> {
        services::outdated(&self.statuses)
    }
}

/// Result of an idempotent add
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetInstall {
    pub outcome: AddOutcome,
    /// `<project>/.claude/<skills|commands>/<slug>.md`
    pub path: PathBuf,
}

/// Destination of an installed agent or command inside a project
pub fn snippet_install_path(project_dir: &Path, kind: SnippetKind, slug: &str) -> PathBuf {
    project_dir
        .join(CLAUDE_DIR)
        .join(kind.project_dir())
        .join(format!("{}.md", slug))
}

/// Copy a library agent or command into the project. `NotFound` if absent.
pub(crate) fn install_snippet<F: FileSystem>(
    fs: &F,
    store: &FsContentStore<F>,
    project_dir: &Path,
    kind: SnippetKind,
    slug: &str,
) -> ContextmarkResult<PathBuf> {
    let snippet = store.load_snippet(kind, slug)?;
    let dest = snippet_install_path(project_dir, kind, slug);
    fs.copy(&snippet.path, &dest)?;
    tracing::debug!(kind = kind.entity_kind().as_str(), slug, dest = %dest.display(), "installed");
    Ok(dest)
}

pub struct ProjectUseCase<F: FileSystem + Clone = LocalFs> {
    env: Environment,
    fs: F,
    store: FsContentStore<F>,
    configs: YamlConfigRepository<F>,
}

impl ProjectUseCase<LocalFs> {
    pub fn new(env: Environment) -> Self {
        Self::with_fs(env, LocalFs::new())
    }
}

impl<F: FileSystem + Clone> ProjectUseCase<F> {
    pub fn with_fs(env: Environment, fs: F) -> Self {
        let store = FsContentStore::with_fs(fs.clone(), env.library().clone());
        let configs = YamlConfigRepository::with_fs(fs.clone());
        Self {
            env,
            fs,
            store,
            configs,
        }
    }

    fn require_ledger(&self, project_dir: &Path) -> ContextmarkResult<LocalConfig> {
        self.env.require_library()?;
        self.configs.require_local(project_dir)
    }

    pub fn drift(&self, project_dir: &Path) -> ContextmarkResult<ProjectDrift> {
        let config = self.require_ledger(project_dir)?;
        let statuses = services::compute_drift(&config.blocks, &self.store)?;
        Ok(ProjectDrift { config, statuses })
    }

    /// Record the block's current snapshot in the ledger. The context file is
    /// not regenerated.
    pub fn add_block(&self, project_dir: &Path, slug: &str) -> ContextmarkResult<AddOutcome> {
        validate_block_slug(slug)?;
        let mut config = self.require_ledger(project_dir)?;
        if config.has_block(slug) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        let block = self.store.load_block(slug)?;
        config.blocks.push(BlockReference {
            name: block.slug.clone(),
            version: block.version().to_string(),
            hash: block.hash.to_string(),
        });
        config.touch();
        self.configs.save_local(project_dir, &config)?;
        Ok(AddOutcome::Added)
    }

    /// Returns whether a reference was removed.
    pub fn remove_block(&self, project_dir: &Path, slug: &str) -> ContextmarkResult<bool> {
        let mut config = self.require_ledger(project_dir)?;
        let before = config.blocks.len();
        config.blocks.retain(|b| b.name != slug);
        let removed = config.blocks.len() != before;
        config.touch();
        self.configs.save_local(project_dir, &config)?;
        Ok(removed)
    }

    /// Copy an agent or command into `.claude/` and record it in the ledger.
    pub fn add_snippet(
        &self,
        project_dir: &Path,
        kind: SnippetKind,
        slug: &str,
    ) -> ContextmarkResult<SnippetInstall> {
        validate_entity_slug(kind.label(), slug)?;
        let mut config = self.require_ledger(project_dir)?;
        let path = snippet_install_path(project_dir, kind, slug);

        let tracked = match kind {
            SnippetKind::Agent => &mut config.agents,
            SnippetKind::Command => &mut config.commands,
        };
        if tracked.iter().any(|s| s == slug) {
            return Ok(SnippetInstall {
                outcome: AddOutcome::AlreadyPresent,
                path,
            });
        }

        install_snippet(&self.fs, &self.store, project_dir, kind, slug)?;
        tracked.push(slug.to_string());
        config.touch();
        self.configs.save_local(project_dir, &config)?;

        Ok(SnippetInstall {
            outcome: AddOutcome::Added,
            path,
        })
    }
}
