//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementation and home directory resolution
//! - `repositories/` - Library content store and YAML config persistence
//! - `vcs/` - Git-backed version control client
//! - `scanner` - Tracked project discovery

pub mod fs;
pub mod repositories;
pub mod scanner;
pub mod vcs;

// Re-export for convenience
pub use fs::LocalFs;
pub use repositories::{FsContentStore, YamlConfigRepository};
pub use scanner::{project_name, ProjectScanner};
pub use vcs::GitCli;
