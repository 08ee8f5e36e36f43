//! Scenario: a library block changes after a project was generated
//!
//! Journey: a project is generated from `style/code`. The author edits the
//! block, later deletes another one, and checks the project's status.

use contextmark::application::{GenerateUseCase, ProjectUseCase};
use contextmark::domain::services::{BlockSource, DriftStatus, RenderOptions, UNKNOWN};
use contextmark::domain::ports::ContentStore;

use crate::common::*;

fn generate(lib: &TestLibrary, slugs: &[&str]) {
    let source = BlockSource::Explicit(slugs.iter().map(|s| s.to_string()).collect());
    GenerateUseCase::new(lib.env.clone())
        .write_and_track(&lib.project, &source, RenderOptions::default())
        .expect("generation succeeds");
}

/// SCENARIO: editing the body makes the reference outdated, version untouched
#[test]
fn scenario_edited_block_becomes_outdated() {
    let lib = TestLibrary::new();
    generate(&lib, &["style/code"]);

    let drift = ProjectUseCase::new(lib.env.clone()).drift(&lib.project).unwrap();
    assert_eq!(drift.statuses.len(), 1);
    assert_eq!(drift.statuses[0].status, DriftStatus::Current);
    let recorded_hash = drift.statuses[0].local_hash.clone();

    let block = lib.store().load_block("style/code").unwrap();
    let edited = std::fs::read_to_string(&block.path)
        .unwrap()
        .replace("Write clear, readable code", "Write clear, boring code");
    std::fs::write(&block.path, edited).unwrap();

    let drift = ProjectUseCase::new(lib.env.clone()).drift(&lib.project).unwrap();
    let status = &drift.statuses[0];
    assert_eq!(status.status, DriftStatus::Outdated);
    assert_eq!(status.local_hash, recorded_hash);
    assert_ne!(status.library_hash, recorded_hash);
    assert_eq!(status.local_version, "1.0.0");
    assert_eq!(status.library_version, "1.0.0");
    assert!(drift.needs_update());
}

/// SCENARIO: a deleted block is reported missing, not raised
#[test]
fn scenario_deleted_block_is_missing() {
    let lib = TestLibrary::new();
    lib.write_block("team/missing", "2.0.0", TEAM_REVIEW_BODY);
    generate(&lib, &["style/code", "team/missing"]);

    lib.store().delete_block("team/missing").unwrap();

    let drift = ProjectUseCase::new(lib.env.clone()).drift(&lib.project).unwrap();
    let missing = drift
        .statuses
        .iter()
        .find(|s| s.block_slug == "team/missing")
        .expect("reference kept");
    assert_eq!(missing.status, DriftStatus::Missing);
    assert_eq!(missing.library_version, UNKNOWN);
    assert_eq!(missing.library_hash, UNKNOWN);
    assert_eq!(missing.local_version, "2.0.0");

    let style = drift
        .statuses
        .iter()
        .find(|s| s.block_slug == "style/code")
        .unwrap();
    assert_eq!(style.status, DriftStatus::Current);
}

/// SCENARIO: `update` brings an outdated project back to current
#[test]
fn scenario_update_refreshes_outdated_project() {
    let lib = TestLibrary::new();
    lib.write_block("laravel/base", "1.0.0", LARAVEL_BASE_BODY);
    generate(&lib, &["laravel/base"]);

    lib.write_block("laravel/base", "1.1.0", "## Laravel\n\n- Prefer form requests");
    let outcome = GenerateUseCase::new(lib.env.clone())
        .update(&lib.project, false)
        .unwrap();
    assert_eq!(outcome.outdated().len(), 1);
    assert!(outcome.report.is_some());

    assert!(lib.read_project_file("CLAUDE.md").contains("Prefer form requests"));
    let drift = ProjectUseCase::new(lib.env.clone()).drift(&lib.project).unwrap();
    assert!(!drift.needs_update());
    assert_eq!(drift.statuses[0].local_version, "1.1.0");
}
