//! Profile entity - an ordered list of block slugs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

/// Profile file contents
///
/// `blocks` order is composition order. Slugs are not checked against the
/// library when a profile is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub agents: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProfileConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        blocks: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            blocks,
            agents: Vec::new(),
            commands: Vec::new(),
            settings: None,
            extra: BTreeMap::new(),
        }
    }

    /// Append a block unless it is already listed. Returns whether it was added.
    pub fn add_block(&mut self, slug: &str) -> bool {
        if self.blocks.iter().any(|b| b == slug) {
            return false;
        }
        self.blocks.push(slug.to_string());
        true
    }

    /// Returns whether anything was removed.
    pub fn remove_block(&mut self, slug: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b != slug);
        self.blocks.len() != before
    }
}

/// A profile loaded from the library
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub path: PathBuf,
    pub slug: String,
    pub config: ProfileConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agents_and_commands_are_optional() {
        let yaml = "name: Default\ndescription: Minimal\nblocks:\n  - style/code\n";
        let config: ProfileConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.blocks, vec!["style/code"]);
        assert!(config.agents.is_empty());
        assert!(config.commands.is_empty());
    }

    #[test]
    fn add_block_skips_duplicates() {
        let mut config = ProfileConfig::new("P", "", vec!["a/one".to_string()]);

        assert!(!config.add_block("a/one"));
        assert!(config.add_block("b/two"));
        assert_eq!(config.blocks, vec!["a/one", "b/two"]);
    }

    #[test]
    fn remove_block_reports_change() {
        let mut config = ProfileConfig::new("P", "", vec!["a/one".to_string()]);

        assert!(config.remove_block("a/one"));
        assert!(!config.remove_block("a/one"));
        assert!(config.blocks.is_empty());
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let yaml = "name: P\nblocks: []\nteam: platform\n";
        let config: ProfileConfig = serde_yaml_ng::from_str(yaml).unwrap();
        let written = serde_yaml_ng::to_string(&config).unwrap();

        assert!(written.contains("team: platform"), "{}", written);
    }
}
