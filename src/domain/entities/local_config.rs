//! Project tracking ledger (`.contextmark.yml`)
//!
//! Records which block versions and fingerprints were embedded into the
//! project's context file at generation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one embedded block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReference {
    /// Block slug
    pub name: String,
    pub version: String,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default)]
    pub project: String,
    /// `None` when the blocks were chosen explicitly
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockReference>,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    /// Whether generation asked for the global context section
    #[serde(default = "include_global_default", skip_serializing_if = "is_included")]
    pub include_global: bool,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_push: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_pull: Option<DateTime<Utc>>,
}

fn include_global_default() -> bool {
    true
}

fn is_included(include_global: &bool) -> bool {
    *include_global
}

impl LocalConfig {
    pub fn new(
        project: impl Into<String>,
        profile: Option<String>,
        blocks: Vec<BlockReference>,
    ) -> Self {
        Self {
            project: project.into(),
            profile,
            blocks,
            agents: Vec::new(),
            commands: Vec::new(),
            include_global: true,
            generated_at: Utc::now(),
            last_push: None,
            last_pull: None,
        }
    }

    pub fn has_block(&self, slug: &str) -> bool {
        self.blocks.iter().any(|b| b.name == slug)
    }

    pub fn block_slugs(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.name.clone()).collect()
    }

    /// Bump `generated_at` to now.
    pub fn touch(&mut self) {
        self.generated_at = Utc::now();
    }

    /// Carry over fields a regeneration does not produce.
    pub fn inherit_from(&mut self, previous: &LocalConfig) {
        self.agents = previous.agents.clone();
        self.commands = previous.commands.clone();
        self.last_push = previous.last_push;
        self.last_pull = previous.last_pull;
    }
}
