//! YAML Config Repository
//!
//! Persists the library's `config.yml` and each project's `.contextmark.yml`.

use std::path::{Path, PathBuf};

use crate::domain::entities::{GlobalConfig, LocalConfig, GLOBAL_CONFIG_KEYS};
use crate::domain::ports::FileSystem;
use crate::domain::value_objects::ConfigWarning;
use crate::environment::project_config_file;
use crate::error::{ContextmarkError, ContextmarkResult};
use crate::infrastructure::fs::LocalFs;

pub struct YamlConfigRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl YamlConfigRepository<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for YamlConfigRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> YamlConfigRepository<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Load the library config, collecting unknown keys as warnings.
    /// A missing file yields the defaults.
    pub fn load_global(
        &self,
        path: &Path,
    ) -> ContextmarkResult<(GlobalConfig, Vec<ConfigWarning>)> {
        if !self.fs.exists(path) {
            return Ok((GlobalConfig::default(), Vec::new()));
        }

        let content = self.fs.read(path)?;
        if content.trim().is_empty() {
            return Ok((GlobalConfig::default(), Vec::new()));
        }

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = serde_yaml_ng::Deserializer::from_str(&content);
        let config: GlobalConfig = serde_ignored::deserialize(deserializer, |p| {
            unknown_paths.push(p.to_string());
        })
        .map_err(|e| invalid_config(path, e))?;

        let warnings = unknown_paths
            .iter()
            .map(|p| {
                ConfigWarning::unknown_key(p, path.to_path_buf(), &content, GLOBAL_CONFIG_KEYS)
            })
            .collect();

        Ok((config, warnings))
    }

    /// Load the library config, logging any warnings.
    pub fn load_global_or_default(&self, path: &Path) -> ContextmarkResult<GlobalConfig> {
        let (config, warnings) = self.load_global(path)?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
        Ok(config)
    }

    pub fn save_global(&self, path: &Path, config: &GlobalConfig) -> ContextmarkResult<()> {
        let yaml = serde_yaml_ng::to_string(config)?;
        self.fs.write(path, &yaml)?;
        Ok(())
    }

    pub fn is_project_initialized(&self, project_dir: &Path) -> bool {
        self.fs.exists(&project_config_file(project_dir))
    }

    /// The project's ledger, or `None` when the project is not tracked.
    pub fn load_local(&self, project_dir: &Path) -> ContextmarkResult<Option<LocalConfig>> {
        let path = project_config_file(project_dir);
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        let content = self.fs.read(&path)?;
        let config = serde_yaml_ng::from_str(&content).map_err(|e| invalid_config(&path, e))?;
        Ok(Some(config))
    }

    /// Like `load_local`, but an untracked project is `ProjectNotInitialized`.
    pub fn require_local(&self, project_dir: &Path) -> ContextmarkResult<LocalConfig> {
        self.load_local(project_dir)?
            .ok_or_else(|| ContextmarkError::ProjectNotInitialized {
                path: project_dir.to_path_buf(),
            })
    }

    pub fn save_local(
        &self,
        project_dir: &Path,
        config: &LocalConfig,
    ) -> ContextmarkResult<PathBuf> {
        let path = project_config_file(project_dir);
        let yaml = serde_yaml_ng::to_string(config)?;
        self.fs.write(&path, &yaml)?;
        tracing::debug!(
            path = %path.display(),
            blocks = config.blocks.len(),
            "saved project ledger"
        );
        Ok(path)
    }
}

fn invalid_config(path: &Path, err: impl std::fmt::Display) -> ContextmarkError {
    ContextmarkError::InvalidConfig {
        file: path.to_path_buf(),
        message: err.to_string(),
    }
}
