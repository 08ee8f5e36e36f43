//! Composer
//!
//! Resolves a profile or an explicit block list into an ordered set of block
//! slugs, then renders those blocks into one context document.
//!
//! Rendering is deterministic: the same resolved set over unchanged blocks
//! always produces the same bytes. Sections are joined by one blank line and
//! the document ends with a single newline.

use crate::domain::entities::Block;
use crate::domain::ports::ContentStore;
use crate::error::{ContextmarkError, ContextmarkResult, EntityKind};

const SECTION_SEPARATOR: &str = "\n\n";

/// Where the block list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSource {
    /// Profile slug. Stale entries render as missing markers.
    Profile(String),
    /// Caller-chosen slugs. Every one must exist.
    Explicit(Vec<String>),
}

impl BlockSource {
    /// Parse a comma-separated list such as `style/code, laravel/base`.
    pub fn explicit_from_csv(list: &str) -> Self {
        BlockSource::Explicit(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn profile_slug(&self) -> Option<&str> {
        match self {
            BlockSource::Profile(slug) => Some(slug),
            BlockSource::Explicit(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBlockSet {
    pub profile: Option<String>,
    /// De-duplicated, first occurrence wins
    pub slugs: Vec<String>,
    pub agents: Vec<String>,
    pub commands: Vec<String>,
}

/// Drop repeated entries, keeping the first occurrence of each.
pub fn dedupe_preserving_order(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

pub fn resolve(
    source: &BlockSource,
    store: &dyn ContentStore,
) -> ContextmarkResult<ResolvedBlockSet> {
    match source {
        BlockSource::Profile(slug) => {
            let profile = store.load_profile(slug)?;
            Ok(ResolvedBlockSet {
                profile: Some(profile.slug),
                slugs: dedupe_preserving_order(&profile.config.blocks),
                agents: dedupe_preserving_order(&profile.config.agents),
                commands: dedupe_preserving_order(&profile.config.commands),
            })
        }
        BlockSource::Explicit(list) => {
            let slugs = dedupe_preserving_order(list);
            for slug in &slugs {
                if !store.block_exists(slug)? {
                    return Err(ContextmarkError::not_found(EntityKind::Block, slug));
                }
            }
            Ok(ResolvedBlockSet {
                profile: None,
                slugs,
                ..Default::default()
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub include_global: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_global: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub content: String,
    /// Blocks that made it into the document, in order
    pub rendered: Vec<Block>,
    /// Slugs that were resolved but are absent from the library
    pub missing: Vec<String>,
}

impl RenderedDocument {
    pub fn rendered_slugs(&self) -> Vec<String> {
        self.rendered.iter().map(|b| b.slug.clone()).collect()
    }
}

/// Placeholder written where a block could not be found
pub fn missing_marker(slug: &str) -> String {
    format!("<!-- contextmark: block \"{}\" not found in library -->", slug)
}

pub fn render(
    set: &ResolvedBlockSet,
    store: &dyn ContentStore,
    options: RenderOptions,
) -> ContextmarkResult<RenderedDocument> {
    let mut sections = Vec::new();
    let mut rendered = Vec::new();
    let mut missing = Vec::new();

    if options.include_global {
        if let Some(global) = store.global_context()? {
            let global = global.trim();
            if !global.is_empty() {
                sections.push(global.to_string());
            }
        }
    }

    for slug in &set.slugs {
        match store.find_block(slug)? {
            Some(block) => {
                sections.push(block.content.clone());
                rendered.push(block);
            }
            None => {
                tracing::warn!(block = %slug, "block not found in library, writing marker");
                sections.push(missing_marker(slug));
                missing.push(slug.clone());
            }
        }
    }

    let mut content = sections.join(SECTION_SEPARATOR);
    if !content.is_empty() {
        content.push('\n');
    }

    Ok(RenderedDocument {
        content,
        rendered,
        missing,
    })
}
