//! Error types for ContextMark
//!
//! Uses `thiserror` for library errors. The binary wraps them in `anyhow`
//! at the command boundary.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::file_system::FsError;

/// Result type alias for ContextMark operations
pub type ContextmarkResult<T> = Result<T, ContextmarkError>;

/// Kind of library entity, used to name what could not be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Block,
    Profile,
    Agent,
    Command,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Block => "block",
            EntityKind::Profile => "profile",
            EntityKind::Agent => "agent",
            EntityKind::Command => "command",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Block => "Block",
            EntityKind::Profile => "Profile",
            EntityKind::Agent => "Agent",
            EntityKind::Command => "Command",
        };
        f.write_str(label)
    }
}

/// Main error type for ContextMark operations
#[derive(Error, Debug)]
pub enum ContextmarkError {
    /// A block, profile, agent or command is not in the library
    #[error("{kind} \"{name}\" not found.")]
    NotFound { kind: EntityKind, name: String },

    /// The library root (or its config file) does not exist yet
    #[error(
        "ContextMark library not found at {}. Run `contextmark init-library` first.",
        .path.display()
    )]
    LibraryNotInitialized { path: PathBuf },

    /// The project has no tracking file
    #[error(
        "Project not initialized at {}. Run `contextmark init` first.",
        .path.display()
    )]
    ProjectNotInitialized { path: PathBuf },

    /// Malformed slug or version, rejected before any write
    #[error("{message}")]
    Validation { message: String },

    /// Version control transport failure, message passed through from the tool
    #[error("{operation} failed: {message}")]
    Transport { operation: String, message: String },

    /// Invalid or unclosed frontmatter
    #[error("invalid frontmatter in {}: {message}", .file.display())]
    InvalidFrontmatter { file: PathBuf, message: String },

    /// Config or profile YAML that does not match its schema
    #[error("invalid config in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ContextmarkError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        ContextmarkError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ContextmarkError::Validation {
            message: message.into(),
        }
    }

    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        ContextmarkError::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True for the "run a setup step first" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContextmarkError::NotFound { .. }
                | ContextmarkError::LibraryNotInitialized { .. }
                | ContextmarkError::ProjectNotInitialized { .. }
        )
    }
}

impl From<FsError> for ContextmarkError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Io(io) => ContextmarkError::Io(io),
            other => ContextmarkError::Io(std::io::Error::other(other.to_string())),
        }
    }
}
