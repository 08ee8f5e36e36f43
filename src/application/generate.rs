//! Generate Use Case
//!
//! Orchestrates one generation:
//! 1. Resolve the block source (profile or explicit list)
//! 2. Render global context plus block bodies
//! 3. Overwrite the project's `CLAUDE.md`
//! 4. Snapshot the rendered blocks into `.contextmark.yml`

use std::path::{Path, PathBuf};

use crate::application::project::install_snippet;
use crate::domain::entities::{LocalConfig, SnippetKind};
use crate::domain::ports::FileSystem;
use crate::domain::services::{
    self, BlockSource, RenderOptions, RenderedDocument, ResolvedBlockSet, UpdateStatus,
};
use crate::environment::{project_context_file, Environment};
use crate::error::ContextmarkResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::{FsContentStore, YamlConfigRepository};
use crate::infrastructure::scanner::{project_name, ProjectScanner};

/// What one generation wrote
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub context_file: PathBuf,
    pub config: LocalConfig,
    pub document: RenderedDocument,
    /// Profile agents and commands that were not in the library
    pub skipped_snippets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Drift before regeneration
    pub statuses: Vec<UpdateStatus>,
    /// `None` when everything was current and `force` was not set
    pub report: Option<GenerationReport>,
}

impl UpdateOutcome {
    pub fn outdated(&self) -> Vec<&UpdateStatus> {
        services::outdated(&self.statuses)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectUpdateResult {
    Current,
    Updated { outdated: usize },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectUpdate {
    pub path: PathBuf,
    pub result: ProjectUpdateResult,
}

pub struct GenerateUseCase<F: FileSystem + Clone = LocalFs> {
    env: Environment,
    fs: F,
    store: FsContentStore<F>,
    configs: YamlConfigRepository<F>,
}

impl GenerateUseCase<LocalFs> {
    pub fn new(env: Environment) -> Self {
        Self::with_fs(env, LocalFs::new())
    }
}

impl<F: FileSystem + Clone> GenerateUseCase<F> {
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

    /// Global context only goes in when the library config also allows it.
    fn effective_options(&self, options: RenderOptions) -> ContextmarkResult<RenderOptions> {
        if !options.include_global {
            return Ok(options);
        }
        let config = self
            .configs
            .load_global_or_default(&self.env.library().config_file())?;
        Ok(RenderOptions {
            include_global: config.global.enabled,
        })
    }

    fn compose(
        &self,
        source: &BlockSource,
        options: RenderOptions,
    ) -> ContextmarkResult<(ResolvedBlockSet, RenderedDocument)> {
        self.env.require_library()?;
        let resolved = services::resolve(source, &self.store)?;
        let options = self.effective_options(options)?;
        let document = services::render(&resolved, &self.store, options)?;
        Ok((resolved, document))
    }

    /// Resolve and render without writing anything.
    pub fn preview(
        &self,
        source: &BlockSource,
        options: RenderOptions,
    ) -> ContextmarkResult<RenderedDocument> {
        Ok(self.compose(source, options)?.1)
    }

    /// Write the project's context file and ledger.
    ///
    /// The context file is overwritten. The ledger lists only blocks that
    /// actually rendered; `agents`, `commands` and sync timestamps from a
    /// previous ledger are kept.
    pub fn write_and_track(
        &self,
        project_dir: &Path,
        source: &BlockSource,
        options: RenderOptions,
    ) -> ContextmarkResult<GenerationReport> {
        let (resolved, document) = self.compose(source, options)?;

        let context_file = project_context_file(project_dir);
        self.fs.write(&context_file, &document.content)?;

        let references = services::record_generation(&document.rendered_slugs(), &self.store)?;
        let previous = self.configs.load_local(project_dir)?;
        let name = match &previous {
            Some(prev) if !prev.project.is_empty() => prev.project.clone(),
            _ => project_name(&self.fs, project_dir),
        };

        let mut config = LocalConfig::new(name, resolved.profile.clone(), references);
        config.include_global = options.include_global;
        if let Some(prev) = &previous {
            config.inherit_from(prev);
        }

        let mut skipped_snippets = Vec::new();
        for (kind, slugs) in [
            (SnippetKind::Agent, &resolved.agents),
            (SnippetKind::Command, &resolved.commands),
        ] {
            for slug in slugs {
                let tracked = match kind {
                    SnippetKind::Agent => &mut config.agents,
                    SnippetKind::Command => &mut config.commands,
                };
                if tracked.contains(slug) {
                    continue;
                }
                match install_snippet(&self.fs, &self.store, project_dir, kind, slug) {
                    Ok(_) => tracked.push(slug.clone()),
                    Err(e) if e.is_not_found() => {
                        tracing::warn!("{}", e);
                        skipped_snippets.push(slug.clone());
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        self.configs.save_local(project_dir, &config)?;
        tracing::info!(
            project = %config.project,
            blocks = config.blocks.len(),
            missing = document.missing.len(),
            "generated {}",
            context_file.display()
        );

        Ok(GenerationReport {
            context_file,
            config,
            document,
            skipped_snippets,
        })
    }

    /// Regenerate from the ledger's recorded source when any block is outdated.
    ///
    /// A ledger with a profile regenerates from that profile; otherwise its
    /// block slugs are used as an explicit list. The global section follows
    /// the choice recorded at generation time.
    pub fn update(&self, project_dir: &Path, force: bool) -> ContextmarkResult<UpdateOutcome> {
        self.env.require_library()?;
        let ledger = self.configs.require_local(project_dir)?;
        let statuses = services::compute_drift(&ledger.blocks, &self.store)?;

        if !force && services::outdated(&statuses).is_empty() {
            return Ok(UpdateOutcome {
                statuses,
                report: None,
            });
        }

        let source = match &ledger.profile {
            Some(profile) => BlockSource::Profile(profile.clone()),
            None => BlockSource::Explicit(ledger.block_slugs()),
        };
        let options = RenderOptions {
            include_global: ledger.include_global,
        };
        let report = self.write_and_track(project_dir, &source, options)?;

        Ok(UpdateOutcome {
            statuses,
            report: Some(report),
        })
    }

    /// Update every tracked project under `root`. Per-project failures are
    /// reported, not propagated.
    pub fn update_all(&self, root: &Path) -> ContextmarkResult<Vec<ProjectUpdate>> {
        self.env.require_library()?;
        let projects = ProjectScanner::new()
            .excluding(self.env.library().root())
            .scan(root);

        Ok(projects
            .into_iter()
            .map(|path| {
                let result = match self.update(&path, false) {
                    Ok(UpdateOutcome { report: None, .. }) => ProjectUpdateResult::Current,
                    Ok(outcome) => ProjectUpdateResult::Updated {
                        outdated: outcome.outdated().len(),
                    },
                    Err(e) => {
                        tracing::warn!("update failed for {}: {}", path.display(), e);
                        ProjectUpdateResult::Failed {
                            message: e.to_string(),
                        }
                    }
                };
                ProjectUpdate { path, result }
            })
            .collect())
    }
}
