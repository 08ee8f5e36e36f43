//! Tracking ledger drift
//!
//! Compares the block snapshots recorded in a project's ledger with the
//! library's current blocks. The fingerprint decides; the version string is
//! informational only.

use serde::Serialize;

use crate::domain::entities::BlockReference;
use crate::domain::ports::ContentStore;
use crate::error::{ContextmarkError, ContextmarkResult};

/// Library version/hash reported for a block that no longer exists
pub const UNKNOWN: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftStatus {
    Current,
    Outdated,
    Missing,
}

impl DriftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftStatus::Current => "current",
            DriftStatus::Outdated => "outdated",
            DriftStatus::Missing => "missing",
        }
    }
}

impl std::fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drift of one ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatus {
    pub block_slug: String,
    pub local_version: String,
    pub library_version: String,
    pub local_hash: String,
    pub library_hash: String,
    pub status: DriftStatus,
}

/// Classify every reference as current, outdated or missing.
///
/// A block absent from the library is a `Missing` status, not an error.
/// A block file whose frontmatter no longer parses is still classified by
/// the fingerprint of its raw bytes, with its library version `UNKNOWN`.
/// Errors are reserved for I/O.
pub fn compute_drift(
    references: &[BlockReference],
    store: &dyn ContentStore,
) -> ContextmarkResult<Vec<UpdateStatus>> {
    references
        .iter()
        .map(|reference| {
            let (library_version, library_hash) = match store.find_block(&reference.name) {
                Ok(Some(block)) => (Some(block.version().to_string()), Some(block.hash)),
                Ok(None) => (None, None),
                Err(e @ ContextmarkError::InvalidFrontmatter { .. }) => {
                    tracing::warn!(block = %reference.name, "unreadable frontmatter: {}", e);
                    (None, store.block_fingerprint(&reference.name)?)
                }
                Err(e) => return Err(e),
            };

            let status = match &library_hash {
                None => DriftStatus::Missing,
                Some(hash) if hash.matches_str(&reference.hash) => DriftStatus::Current,
                Some(_) => DriftStatus::Outdated,
            };

            Ok(UpdateStatus {
                block_slug: reference.name.clone(),
                local_version: reference.version.clone(),
                library_version: library_version.unwrap_or_else(|| UNKNOWN.to_string()),
                local_hash: reference.hash.clone(),
                library_hash: library_hash
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                status,
            })
        })
        .collect()
}

/// Snapshot the current version and fingerprint of each block, in input order.
///
/// Every slug must exist.
pub fn record_generation(
    slugs: &[String],
    store: &dyn ContentStore,
) -> ContextmarkResult<Vec<BlockReference>> {
    slugs
        .iter()
        .map(|slug| {
            let block = store.load_block(slug)?;
            Ok(BlockReference {
                name: block.slug.clone(),
                version: block.version().to_string(),
                hash: block.hash.to_string(),
            })
        })
        .collect()
}

/// True if any entry is not current.
pub fn needs_update(statuses: &[UpdateStatus]) -> bool {
    statuses.iter().any(|s| s.status != DriftStatus::Current)
}

pub fn outdated(statuses: &[UpdateStatus]) -> Vec<&UpdateStatus> {
    statuses
        .iter()
        .filter(|s| s.status == DriftStatus::Outdated)
        .collect()
}
