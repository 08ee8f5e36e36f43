//! Explicit path environment
//!
//! Every location the engine reads or writes is derived from an
//! [`Environment`]: the user's home directory and the library root. Nothing
//! below this module reads process state, so tests can point the whole engine
//! at a temporary directory.

use std::path::{Path, PathBuf};

use crate::error::{ContextmarkError, ContextmarkResult};
use crate::infrastructure::fs::{contextmark_home_dir, library_root_override};

/// Library directory name under the home directory
pub const LIBRARY_DIR_NAME: &str = ".contextmark";
/// Library config file name
pub const CONFIG_FILE_NAME: &str = "config.yml";
/// Per-project tracking file
pub const LOCAL_CONFIG_FILE: &str = ".contextmark.yml";
/// Generated context file, in projects and in the global mirror
pub const CONTEXT_FILE: &str = "CLAUDE.md";
/// Per-project assistant directory
pub const CLAUDE_DIR: &str = ".claude";
/// Global rules directory (under `~/.claude` and `global/`)
pub const RULES_DIR: &str = "rules";
/// Global skills directory (under `~/.claude` and `global/`)
pub const SKILLS_DIR: &str = "skills";

/// Fixed directory layout of a library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLayout {
    root: PathBuf,
}

impl LibraryLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blocks_dir(&self) -> PathBuf {
        self.root.join("blocks")
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.root.join("agents")
    }

    pub fn commands_dir(&self) -> PathBuf {
        self.root.join("commands")
    }

    pub fn global_dir(&self) -> PathBuf {
        self.root.join("global")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join("projects")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// `blocks/<category>/<name>.md`
    pub fn block_path(&self, slug: &str) -> PathBuf {
        self.blocks_dir().join(format!("{}.md", slug))
    }

    /// `profiles/<slug>.yml`
    pub fn profile_path(&self, slug: &str) -> PathBuf {
        self.profiles_dir().join(format!("{}.yml", slug))
    }

    pub fn agent_path(&self, slug: &str) -> PathBuf {
        self.agents_dir().join(format!("{}.md", slug))
    }

    pub fn command_path(&self, slug: &str) -> PathBuf {
        self.commands_dir().join(format!("{}.md", slug))
    }

    pub fn global_context_file(&self) -> PathBuf {
        self.global_dir().join(CONTEXT_FILE)
    }

    /// `projects/<name>`, the mirror of one project
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.projects_dir().join(name)
    }
}

/// Home directory plus library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    home: PathBuf,
    library: LibraryLayout,
}

impl Environment {
    pub fn new(home: impl Into<PathBuf>, library_root: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            library: LibraryLayout::new(library_root),
        }
    }

    /// Library at the default location under `home`
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let library_root = home.join(LIBRARY_DIR_NAME);
        Self::new(home, library_root)
    }

    /// Resolve from `CONTEXTMARK_HOME` / `CONTEXTMARK_LIBRARY` or the system
    /// home directory. `library_override` wins over both.
    pub fn from_process(library_override: Option<PathBuf>) -> ContextmarkResult<Self> {
        let home = contextmark_home_dir().ok_or_else(|| {
            ContextmarkError::validation("could not determine the home directory")
        })?;
        let library_root = library_override
            .or_else(library_root_override)
            .unwrap_or_else(|| home.join(LIBRARY_DIR_NAME));
        Ok(Self::new(home, library_root))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn library(&self) -> &LibraryLayout {
        &self.library
    }

    /// `~/.claude`
    pub fn user_claude_dir(&self) -> PathBuf {
        self.home.join(CLAUDE_DIR)
    }

    /// True when the library root and its config file both exist.
    pub fn is_library_initialized(&self) -> bool {
        self.library.root().is_dir() && self.library.config_file().is_file()
    }

    pub fn require_library(&self) -> ContextmarkResult<()> {
        if self.is_library_initialized() {
            Ok(())
        } else {
            Err(ContextmarkError::LibraryNotInitialized {
                path: self.library.root().to_path_buf(),
            })
        }
    }
}

/// `<project>/CLAUDE.md`
pub fn project_context_file(project_dir: &Path) -> PathBuf {
    project_dir.join(CONTEXT_FILE)
}

/// `<project>/.contextmark.yml`
pub fn project_config_file(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCAL_CONFIG_FILE)
}
