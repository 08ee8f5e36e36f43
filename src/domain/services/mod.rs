//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! Library access goes through the `ContentStore` port.

mod composer;
mod drift;
mod partition;
mod text_diff;

pub use composer::{
    dedupe_preserving_order, missing_marker, render, resolve, BlockSource, RenderOptions,
    RenderedDocument, ResolvedBlockSet,
};
pub use drift::{
    compute_drift, needs_update, outdated, record_generation, DriftStatus, UpdateStatus, UNKNOWN,
};
pub use partition::{classify, DiffResult, FileComparison, SyncState};
pub use text_diff::{line_changes, unified_diff, LineChanges};
