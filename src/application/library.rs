//! Library bootstrap
//!
//! Creates the fixed directory layout, the default `config.yml`, one example
//! block, a default profile and a global context placeholder.

use crate::domain::entities::{GlobalConfig, Profile, ProfileConfig};
use crate::domain::ports::FileSystem;
use crate::environment::Environment;
use crate::error::ContextmarkResult;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::repositories::{FsContentStore, YamlConfigRepository};

const EXAMPLE_BLOCK_SLUG: &str = "style/code";

const EXAMPLE_BLOCK: &str = "---
name: Style - Code
description: Personal code style conventions
version: 1.0.0
tags: [style, conventions]
---

## Code Style

### General Principles
- Write clear, readable code
- Prefer explicit over implicit
- Keep functions small and focused
- Use meaningful variable names

### Error Handling
- Handle errors at the appropriate level
- Provide meaningful error messages
";

const GLOBAL_PLACEHOLDER: &str = "# Global Context

This context applies to ALL projects.

## My Preferences

<!-- Add your global preferences here -->
";

const STARTER_CATEGORIES: &[&str] = &["laravel", "style", "tools"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitLibraryOutcome {
    Created,
    /// Library exists and `force` was not set
    AlreadyInitialized,
}

pub struct LibraryUseCase<F: FileSystem + Clone = LocalFs> {
    env: Environment,
    fs: F,
}

impl LibraryUseCase<LocalFs> {
    pub fn new(env: Environment) -> Self {
        Self::with_fs(env, LocalFs::new())
    }
}

impl<F: FileSystem + Clone> LibraryUseCase<F> {
    pub fn with_fs(env: Environment, fs: F) -> Self {
        Self { env, fs }
    }

    /// Create the library. With `force`, starter files are rewritten; blocks
    /// and profiles that are not starter files are left alone.
    pub fn init(&self, force: bool) -> ContextmarkResult<InitLibraryOutcome> {
        if self.env.is_library_initialized() && !force {
            return Ok(InitLibraryOutcome::AlreadyInitialized);
        }

        let layout = self.env.library();
        for dir in [
            layout.blocks_dir(),
            layout.profiles_dir(),
            layout.agents_dir(),
            layout.commands_dir(),
            layout.global_dir(),
            layout.projects_dir(),
        ] {
            self.fs.create_dir_all(&dir)?;
        }
        for category in STARTER_CATEGORIES {
            self.fs.create_dir_all(&layout.blocks_dir().join(category))?;
        }

        YamlConfigRepository::with_fs(self.fs.clone())
            .save_global(&layout.config_file(), &GlobalConfig::default())?;

        let store = FsContentStore::with_fs(self.fs.clone(), layout.clone());
        store.write_entity(&layout.block_path(EXAMPLE_BLOCK_SLUG), EXAMPLE_BLOCK)?;
        store.save_profile(&Profile {
            path: layout.profile_path("default"),
            slug: "default".to_string(),
            config: ProfileConfig::new(
                "Default",
                "Minimal default profile",
                vec![EXAMPLE_BLOCK_SLUG.to_string()],
            ),
        })?;
        store.write_entity(&layout.global_context_file(), GLOBAL_PLACEHOLDER)?;

        tracing::info!(root = %layout.root().display(), "initialized library");
        Ok(InitLibraryOutcome::Created)
    }
}
