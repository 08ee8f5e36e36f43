//! Slug and version validation
//!
//! Block slugs are `category/name`; profile, agent and command slugs are a
//! single kebab-case segment. Versions are `MAJOR.MINOR.PATCH[-prerelease]`.

use crate::error::{ContextmarkError, ContextmarkResult};

fn is_kebab_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// `category/name`, lowercase letters, digits and dashes
pub fn is_valid_block_slug(slug: &str) -> bool {
    match slug.split_once('/') {
        Some((category, name)) => is_kebab_segment(category) && is_kebab_segment(name),
        None => false,
    }
}

/// Single kebab-case segment (profiles, agents, commands)
pub fn is_valid_entity_slug(slug: &str) -> bool {
    is_kebab_segment(slug)
}

/// Semver without build metadata
pub fn is_valid_version(version: &str) -> bool {
    semver::Version::parse(version)
        .map(|v| v.build.is_empty())
        .unwrap_or(false)
}

pub fn validate_block_slug(slug: &str) -> ContextmarkResult<()> {
    if slug.is_empty() {
        return Err(ContextmarkError::validation("Block slug is required"));
    }
    if !is_valid_block_slug(slug) {
        return Err(ContextmarkError::validation(format!(
            "Block slug \"{}\" must be in format \"category/name\" (e.g., laravel/base)",
            slug
        )));
    }
    Ok(())
}

/// `what` names the entity in the message ("Profile", "Agent", ...).
pub fn validate_entity_slug(what: &str, slug: &str) -> ContextmarkResult<()> {
    if slug.is_empty() {
        return Err(ContextmarkError::validation(format!("{} slug is required", what)));
    }
    if !is_valid_entity_slug(slug) {
        return Err(ContextmarkError::validation(format!(
            "{} slug \"{}\" must be kebab-case (e.g., laravel-package)",
            what, slug
        )));
    }
    Ok(())
}

pub fn validate_version(version: &str) -> ContextmarkResult<()> {
    if is_valid_version(version) {
        Ok(())
    } else {
        Err(ContextmarkError::validation(format!(
            "Version \"{}\" must be MAJOR.MINOR.PATCH with an optional -prerelease (e.g., 1.2.0)",
            version
        )))
    }
}
