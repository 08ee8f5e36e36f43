//! Block entity - a named, versioned markdown snippet

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::domain::value_objects::Fingerprint;
use crate::error::ContextmarkResult;
use crate::parser::{extract_frontmatter, parse_metadata, typed_frontmatter};

/// Block frontmatter
///
/// `name`, `description` and `version` are required. Keys outside the schema
/// are kept in `extra` so rewriting a block never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockFrontmatter {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A block loaded from the library
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub path: PathBuf,
    /// `category/name`, relative to the blocks root without extension
    pub slug: String,
    pub frontmatter: BlockFrontmatter,
    /// Body after the frontmatter, trimmed
    pub content: String,
    /// Fingerprint of the entire raw file
    pub hash: Fingerprint,
}

impl Block {
    /// Build a block from its raw file content.
    pub fn from_raw(path: &Path, slug: impl Into<String>, raw: &str) -> ContextmarkResult<Self> {
        let extracted = extract_frontmatter(raw, path)?;
        let metadata = parse_metadata(extracted.yaml.as_deref(), path)?;
        let frontmatter: BlockFrontmatter = typed_frontmatter(&metadata, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            slug: slug.into(),
            frontmatter,
            content: extracted.body.trim().to_string(),
            hash: Fingerprint::of(raw.as_bytes()),
        })
    }

    /// First slug segment
    pub fn category(&self) -> &str {
        self.slug.split('/').next().unwrap_or(&self.slug)
    }

    pub fn version(&self) -> &str {
        &self.frontmatter.version
    }
}

/// Blocks grouped by their category directory
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCategory {
    pub name: String,
    pub blocks: Vec<Block>,
}

/// Starter content for a new block
///
/// Frontmatter is serialized, never interpolated into the YAML text.
pub fn block_template(name: &str, description: &str) -> ContextmarkResult<String> {
    let frontmatter = BlockFrontmatter {
        name: name.to_string(),
        description: description.to_string(),
        version: "1.0.0".to_string(),
        tags: Vec::new(),
        extra: BTreeMap::new(),
    };
    let yaml = serde_yaml_ng::to_string(&frontmatter)?;
    Ok(format!(
        "---\n{yaml}---\n\n## {name}\n\n<!-- Add your content here -->\n\n"
    ))
}
