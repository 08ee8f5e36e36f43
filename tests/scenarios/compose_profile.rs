//! Scenario: composing a profile into CLAUDE.md
//!
//! Journey: a profile lists the same block twice and references a block that
//! was never written. Generation must still produce a stable document.

use contextmark::application::GenerateUseCase;
use contextmark::domain::services::{missing_marker, BlockSource, RenderOptions};
use contextmark::infrastructure::YamlConfigRepository;

use crate::common::*;

fn no_global() -> RenderOptions {
    RenderOptions {
        include_global: false,
    }
}

/// SCENARIO: duplicate profile entries render once, in first-seen order
#[test]
fn scenario_duplicate_blocks_are_rendered_once() {
    let lib = TestLibrary::new();
    lib.write_block("a/one", "1.0.0", "## One\n\nFirst.");
    lib.write_block("b/two", "1.0.0", "## Two\n\nSecond.");
    lib.write_profile("dup", &["a/one", "a/one", "b/two"]);

    let report = GenerateUseCase::new(lib.env.clone())
        .write_and_track(&lib.project, &BlockSource::Profile("dup".into()), no_global())
        .unwrap();

    assert_eq!(report.document.rendered_slugs(), vec!["a/one", "b/two"]);
    insta::assert_snapshot!(lib.read_project_file("CLAUDE.md"), @r"
    ## One

    First.

    ## Two

    Second.
    ");

    let ledger = YamlConfigRepository::new().require_local(&lib.project).unwrap();
    assert_eq!(ledger.profile.as_deref(), Some("dup"));
    assert_eq!(ledger.block_slugs(), vec!["a/one", "b/two"]);
}

/// SCENARIO: generating twice without library changes is byte-identical
#[test]
fn scenario_generation_is_idempotent() {
    let lib = TestLibrary::new();
    lib.write_block("laravel/base", "1.0.0", LARAVEL_BASE_BODY);
    lib.write_profile("laravel", &["style/code", "laravel/base"]);
    let use_case = GenerateUseCase::new(lib.env.clone());
    let source = BlockSource::Profile("laravel".into());

    use_case
        .write_and_track(&lib.project, &source, RenderOptions::default())
        .unwrap();
    let first = lib.read_project_file("CLAUDE.md");
    use_case
        .write_and_track(&lib.project, &source, RenderOptions::default())
        .unwrap();
    let second = lib.read_project_file("CLAUDE.md");

    assert_eq!(first, second);
    assert!(first.starts_with("# Global Context"));
    assert!(first.ends_with('\n'));
    assert!(!first.ends_with("\n\n"));
}

/// SCENARIO: a stale profile entry leaves a marker and stays out of the ledger
#[test]
fn scenario_stale_profile_entry_leaves_marker() {
    let lib = TestLibrary::new();
    lib.write_profile("stale", &["style/code", "team/gone"]);

    let report = GenerateUseCase::new(lib.env.clone())
        .write_and_track(&lib.project, &BlockSource::Profile("stale".into()), no_global())
        .unwrap();

    assert_eq!(report.document.missing, vec!["team/gone"]);
    let content = lib.read_project_file("CLAUDE.md");
    assert!(content.contains(&missing_marker("team/gone")));
    assert_eq!(report.config.block_slugs(), vec!["style/code"]);
}
