//! ContentStore port - library lookups needed by the domain services
//!
//! Drift computation and composition only ever read from the library, so
//! this trait is the read side. Writes live on the concrete repository.

use crate::domain::entities::{Block, Profile};
use crate::domain::value_objects::Fingerprint;
use crate::error::{ContextmarkError, ContextmarkResult};

pub trait ContentStore {
    /// Load a block by slug. A missing block is `NotFound`.
    fn load_block(&self, slug: &str) -> ContextmarkResult<Block>;

    /// Fingerprint of a block file's raw bytes, without parsing it.
    /// `None` when the file does not exist.
    fn block_fingerprint(&self, slug: &str) -> ContextmarkResult<Option<Fingerprint>>;

    /// Load a profile by slug. A missing profile is `NotFound`.
    fn load_profile(&self, slug: &str) -> ContextmarkResult<Profile>;

    /// Body of the library's global context file, `None` when absent or blank.
    fn global_context(&self) -> ContextmarkResult<Option<String>>;

    /// Like `load_block`, but a missing block is `Ok(None)`.
    fn find_block(&self, slug: &str) -> ContextmarkResult<Option<Block>> {
        match self.load_block(slug) {
            Ok(block) => Ok(Some(block)),
            Err(ContextmarkError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn block_exists(&self, slug: &str) -> ContextmarkResult<bool> {
        Ok(self.find_block(slug)?.is_some())
    }
}
