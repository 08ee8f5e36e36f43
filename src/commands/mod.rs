//! Command handlers
//!
//! Each handler wires one CLI command to its use case and prints the
//! outcome, as text or as JSON when `--json` is set.

pub mod init;
pub mod library;
pub mod mirror;
pub mod project;
pub mod status;
pub mod sync;
pub mod update;

/// Print a JSON value on its own line.
pub(crate) fn emit_json(value: serde_json::Value) {
    println!("{}", value);
}
