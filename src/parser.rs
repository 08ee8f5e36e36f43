//! Frontmatter parser for library markdown files
//!
//! Blocks, agents and commands may start with a YAML frontmatter section
//! delimited by `---` lines. A file without one parses as empty metadata.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml_ng::{Mapping, Value};

use crate::error::{ContextmarkError, ContextmarkResult};

/// Delimiter for frontmatter sections
const FRONTMATTER_DELIMITER: &str = "---";

/// Result of splitting a file into frontmatter and body
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFrontmatter {
    /// The raw YAML between the delimiters, `None` when the file has no frontmatter
    pub yaml: Option<String>,
    /// Everything after the closing delimiter, untrimmed
    pub body: String,
}

/// Split file content into frontmatter and body.
///
/// Byte offsets are tracked instead of re-joining lines, so the body keeps
/// its original line endings.
///
/// # Example
/// ```text
/// ---
/// name: Style - Code
/// version: 1.0.0
/// ---
/// ## Code Style
/// ```
pub fn extract_frontmatter(content: &str, file: &Path) -> ContextmarkResult<ExtractedFrontmatter> {
    let mut lines = content.split_inclusive('\n');

    let opening = match lines.next() {
        Some(line) if line.trim_end() == FRONTMATTER_DELIMITER => line,
        _ => {
            return Ok(ExtractedFrontmatter {
                yaml: None,
                body: content.to_string(),
            })
        }
    };

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            return Ok(ExtractedFrontmatter {
                yaml: Some(content[yaml_start..offset].to_string()),
                body: content[offset + line.len()..].to_string(),
            });
        }
        offset += line.len();
    }

    Err(ContextmarkError::InvalidFrontmatter {
        file: file.to_path_buf(),
        message: "unclosed frontmatter - missing closing '---'".to_string(),
    })
}

/// Parse frontmatter YAML into a mapping. Absent or blank frontmatter is an
/// empty mapping.
pub fn parse_metadata(yaml: Option<&str>, file: &Path) -> ContextmarkResult<Mapping> {
    let yaml = match yaml {
        Some(y) if !y.trim().is_empty() => y,
        _ => return Ok(Mapping::new()),
    };

    let value: Value = serde_yaml_ng::from_str(yaml).map_err(|e| invalid(file, yaml, &e))?;
    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(map) => Ok(map),
        _ => Err(ContextmarkError::InvalidFrontmatter {
            file: file.to_path_buf(),
            message: "frontmatter must be a YAML mapping".to_string(),
        }),
    }
}

/// Convert parsed metadata into a typed frontmatter struct.
pub fn typed_frontmatter<T: DeserializeOwned>(
    metadata: &Mapping,
    file: &Path,
) -> ContextmarkResult<T> {
    serde_yaml_ng::from_value(Value::Mapping(metadata.clone())).map_err(|e| {
        ContextmarkError::InvalidFrontmatter {
            file: file.to_path_buf(),
            message: e.to_string(),
        }
    })
}

fn invalid(file: &Path, yaml: &str, err: &serde_yaml_ng::Error) -> ContextmarkError {
    let mut message = match err.location() {
        Some(loc) => format!("Line {}: Invalid YAML - {}", loc.line(), err),
        None => format!("Invalid YAML - {}", err),
    };

    if should_hint_colon_quotes(yaml, &err.to_string()) {
        message.push_str("\nHint: Strings with colons need quotes: description: \"My: Rule\"");
    }

    ContextmarkError::InvalidFrontmatter {
        file: file.to_path_buf(),
        message,
    }
}

fn should_hint_colon_quotes(yaml: &str, err_str: &str) -> bool {
    // unquoted scalars containing `: ` are the usual culprit
    err_str.contains("mapping values are not allowed")
        || yaml
            .lines()
            .any(|l| l.starts_with("description:") && l.matches(": ").count() > 1)
}
