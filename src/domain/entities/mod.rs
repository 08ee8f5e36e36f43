//! Domain Entities
//!
//! - `Block` - A versioned markdown snippet in the library
//! - `Profile` - An ordered composition of blocks
//! - `Snippet` - An agent or command file
//! - `LocalConfig` - Per-project tracking ledger
//! - `GlobalConfig` - Library settings

mod block;
mod global_config;
mod local_config;
mod profile;
mod snippet;

pub use block::{block_template, Block, BlockCategory, BlockFrontmatter};
pub use global_config::{
    CliSettings, GlobalConfig, GlobalContextSettings, PathSettings, SyncMethod, SyncSettings,
    GLOBAL_CONFIG_KEYS,
};
pub use local_config::{BlockReference, LocalConfig};
pub use profile::{Profile, ProfileConfig};
pub use snippet::{snippet_template, Snippet, SnippetFrontmatter, SnippetKind};
