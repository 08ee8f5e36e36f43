//! Content fingerprint value object
//!
//! A short, fixed-width digest of a file's raw bytes. Used to detect drift
//! between a project's ledger and the library; not a security boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Truncated SHA-256 over raw bytes, as lowercase hex.
///
/// No normalization is applied: byte-identical input always gives the same
/// fingerprint and any byte difference (line endings, frontmatter) changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Number of hex characters kept
    pub const WIDTH: usize = 8;

    /// Compute the fingerprint of raw file bytes
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let hex = format!("{:x}", digest);
        Self(hex[..Self::WIDTH].to_string())
    }

    /// Wrap an already computed hex string (e.g. read back from a ledger)
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_str(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_short_hex() {
        let fp = Fingerprint::of(b"hello");
        assert_eq!(fp.as_str().len(), Fingerprint::WIDTH);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // sha256("hello") = 2cf24dba...
        assert_eq!(fp.as_str(), "2cf24dba");
    }

    #[test]
    fn same_bytes_same_fingerprint() {
        assert_eq!(Fingerprint::of(b"test"), Fingerprint::of(b"test"));
    }

    #[test]
    fn line_endings_are_not_normalized() {
        assert_ne!(Fingerprint::of(b"a\nb\n"), Fingerprint::of(b"a\r\nb\r\n"));
    }

    #[test]
    fn frontmatter_only_edit_changes_fingerprint() {
        let v1 = b"---\nversion: 1.0.0\n---\nbody\n";
        let v2 = b"---\nversion: 1.0.1\n---\nbody\n";
        assert_ne!(Fingerprint::of(v1), Fingerprint::of(v2));
    }

    #[test]
    fn matches_str_compares_hex() {
        let fp = Fingerprint::from_hex("aaaa1111");
        assert!(fp.matches_str("aaaa1111"));
        assert!(!fp.matches_str("bbbb2222"));
        assert_eq!(fp.to_string(), "aaaa1111");
    }
}
