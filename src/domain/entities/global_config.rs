//! Library-wide settings (`<library>/config.yml`)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub default_profile: String,
    pub sync: SyncSettings,
    pub cli: CliSettings,
    pub global: GlobalContextSettings,
    pub paths: PathSettings,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_profile: "default".to_string(),
            sync: SyncSettings::default(),
            cli: CliSettings::default(),
            global: GlobalContextSettings::default(),
            paths: PathSettings::default(),
        }
    }
}

/// How the library itself is synchronized with a remote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    Git,
    #[default]
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub method: SyncMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    pub auto_pull: bool,
    pub auto_push: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            method: SyncMethod::Disabled,
            remote: None,
            auto_pull: true,
            auto_push: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    pub colors: bool,
    pub confirm_destructive: bool,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            colors: true,
            confirm_destructive: true,
        }
    }
}

/// Whether `global/CLAUDE.md` is prepended to generated context files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalContextSettings {
    pub enabled: bool,
}

impl Default for GlobalContextSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<PathBuf>,
}

/// Known keys, for typo suggestions on unknown ones
pub const GLOBAL_CONFIG_KEYS: &[&str] = &[
    "default_profile",
    "sync",
    "method",
    "remote",
    "auto_pull",
    "auto_push",
    "cli",
    "colors",
    "confirm_destructive",
    "global",
    "enabled",
    "paths",
    "library",
];
