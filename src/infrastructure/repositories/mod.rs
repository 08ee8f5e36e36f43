//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod config;
mod content_store;

pub use config::YamlConfigRepository;
pub use content_store::{Entity, FsContentStore};
