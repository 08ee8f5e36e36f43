//! Value objects - immutable, validated domain types

mod config_warning;
mod hash;
mod slug;

pub use config_warning::ConfigWarning;
pub use hash::Fingerprint;
pub use slug::{
    is_valid_block_slug, is_valid_entity_slug, is_valid_version, validate_block_slug,
    validate_entity_slug, validate_version,
};
