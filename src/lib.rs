//! ContextMark - versioned context library for AI coding assistants
//!
//! ContextMark keeps reusable Markdown blocks in a personal library, composes
//! them into a project's `CLAUDE.md`, records which block versions each
//! project was generated from, and mirrors project and global context files
//! to and from the library. The library itself can be synced to a Git remote.

pub mod application;
pub mod domain;
pub mod environment;
pub mod error;
pub mod infrastructure;
pub mod parser;

// Re-exports for convenience
pub use application::{
    GenerateUseCase, LibraryUseCase, MirrorUseCase, ProjectUseCase, RemoteSyncUseCase,
};
pub use domain::entities::{Block, GlobalConfig, LocalConfig, Profile, Snippet, SnippetKind};
pub use domain::services::{BlockSource, DiffResult, DriftStatus, RenderOptions, UpdateStatus};
pub use domain::value_objects::Fingerprint;
pub use environment::Environment;
pub use error::{ContextmarkError, ContextmarkResult};
pub use parser::extract_frontmatter;
