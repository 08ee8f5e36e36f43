//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod content_store;
pub mod file_system;
pub mod vcs;

pub use content_store::ContentStore;
pub use file_system::{FileSystem, FsError, FsResult};
pub use vcs::{VcsClient, VcsStatus};
