//! Agents and commands
//!
//! Both are markdown files with `name`/`description` frontmatter. They are
//! copied into projects as-is and are not part of drift tracking.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::error::{ContextmarkResult, EntityKind};
use crate::parser::{extract_frontmatter, parse_metadata, typed_frontmatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    Agent,
    Command,
}

impl SnippetKind {
    /// Library directory holding this kind
    pub fn library_dir(&self) -> &'static str {
        match self {
            SnippetKind::Agent => "agents",
            SnippetKind::Command => "commands",
        }
    }

    /// Directory under a project's `.claude/` the file is copied into
    pub fn project_dir(&self) -> &'static str {
        match self {
            SnippetKind::Agent => "skills",
            SnippetKind::Command => "commands",
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        match self {
            SnippetKind::Agent => EntityKind::Agent,
            SnippetKind::Command => EntityKind::Command,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SnippetKind::Agent => "Agent",
            SnippetKind::Command => "Command",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnippetFrontmatter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub kind: SnippetKind,
    pub path: PathBuf,
    pub slug: String,
    pub frontmatter: SnippetFrontmatter,
    pub content: String,
}

impl Snippet {
    pub fn from_raw(
        kind: SnippetKind,
        path: &Path,
        slug: impl Into<String>,
        raw: &str,
    ) -> ContextmarkResult<Self> {
        let extracted = extract_frontmatter(raw, path)?;
        let metadata = parse_metadata(extracted.yaml.as_deref(), path)?;
        let frontmatter: SnippetFrontmatter = typed_frontmatter(&metadata, path)?;
        Ok(Self {
            kind,
            path: path.to_path_buf(),
            slug: slug.into(),
            frontmatter,
            content: extracted.body.trim().to_string(),
        })
    }
}

pub fn snippet_template(
    kind: SnippetKind,
    name: &str,
    description: &str,
) -> ContextmarkResult<String> {
    let placeholder = match kind {
        SnippetKind::Agent => "<!-- Agent instructions here -->",
        SnippetKind::Command => "<!-- Command instructions here -->",
    };
    let frontmatter = SnippetFrontmatter {
        name: name.to_string(),
        description: description.to_string(),
        extra: BTreeMap::new(),
    };
    let yaml = serde_yaml_ng::to_string(&frontmatter)?;
    Ok(format!("---\n{yaml}---\n\n# {name}\n\n{placeholder}\n\n"))
}
