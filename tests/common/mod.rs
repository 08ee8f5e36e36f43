//! Common test utilities for ContextMark integration and scenario tests.
//!
//! This module provides:
//! - `TestLibrary`: isolated home, library and project in temp directories
//! - Assertion macros: `assert_exists!`, `assert_output_contains!`
//! - Fixtures: reusable block and profile content

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
