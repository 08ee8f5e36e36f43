//! Scenario: mirroring a project's context files through the library
//!
//! Journey: a project gains a local skill, is pushed, edited on another
//! machine (simulated by editing the mirror), and pulled back.

use contextmark::application::{GenerateUseCase, MirrorUseCase};
use contextmark::domain::services::{BlockSource, RenderOptions, SyncState};
use contextmark::infrastructure::YamlConfigRepository;

use crate::common::*;

/// SCENARIO: a local-only skill shows up as `localOnly`
#[test]
fn scenario_local_skill_is_local_only() {
    let lib = TestLibrary::new();
    lib.write_project_file(".claude/skills/a.md", "# Skill A\n");

    let diff = MirrorUseCase::new(lib.env.clone())
        .diff_project(&lib.project)
        .unwrap();

    assert_eq!(diff.local_only, vec![".claude/skills/a.md"]);
    assert!(diff.library_only.is_empty());
    assert!(diff.different.is_empty());
    assert!(diff.has_diff);
}

/// SCENARIO: push, remote edit, pull round trip
#[test]
fn scenario_push_edit_pull() {
    let lib = TestLibrary::new();
    let mirror = MirrorUseCase::new(lib.env.clone());
    lib.write_project_file("CLAUDE.md", "# App\n");
    lib.write_project_file(".claude/skills/a.md", "# Skill A\n");

    let pushed = mirror.push_project(&lib.project).unwrap();
    assert!(pushed.success);
    assert_eq!(pushed.files_changed, vec!["CLAUDE.md", ".claude/skills/a.md"]);
    assert_eq!(mirror.diff_project(&lib.project).unwrap().state(), SyncState::InSync);
    assert_eq!(mirror.list_library_projects().unwrap(), vec!["app"]);

    lib.write_library_file("projects/app/CLAUDE.md", "# App\n\nEdited elsewhere.\n");
    let diff = mirror.diff_project(&lib.project).unwrap();
    assert_eq!(diff.different, vec!["CLAUDE.md"]);
    assert_eq!(diff.identical, vec![".claude/skills/a.md"]);

    let pulled = mirror.pull_project(&lib.project).unwrap();
    assert!(pulled.success);
    assert!(lib.read_project_file("CLAUDE.md").contains("Edited elsewhere."));
    assert!(!mirror.diff_project(&lib.project).unwrap().has_diff);
}

/// SCENARIO: pushing replaces the mirrored `.claude/` tree
#[test]
fn scenario_push_replaces_mirrored_directory() {
    let lib = TestLibrary::new();
    let mirror = MirrorUseCase::new(lib.env.clone());
    lib.write_project_file(".claude/skills/old.md", "old\n");
    mirror.push_project(&lib.project).unwrap();

    std::fs::remove_file(lib.project_path(".claude/skills/old.md")).unwrap();
    lib.write_project_file(".claude/skills/new.md", "new\n");
    mirror.push_project(&lib.project).unwrap();

    assert!(!lib.library_path("projects/app/.claude/skills/old.md").exists());
    crate::assert_exists!(lib.library_path("projects/app/.claude/skills/new.md"));
}

/// SCENARIO: a tracked project records when it was last pushed and pulled
#[test]
fn scenario_sync_timestamps_are_recorded() {
    let lib = TestLibrary::new();
    let mirror = MirrorUseCase::new(lib.env.clone());
    GenerateUseCase::new(lib.env.clone())
        .write_and_track(
            &lib.project,
            &BlockSource::Profile("default".into()),
            RenderOptions::default(),
        )
        .unwrap();

    mirror.push_project(&lib.project).unwrap();
    let ledger = YamlConfigRepository::new().require_local(&lib.project).unwrap();
    assert!(ledger.last_push.is_some());
    assert!(ledger.last_pull.is_none());

    mirror.pull_project(&lib.project).unwrap();
    let ledger = YamlConfigRepository::new().require_local(&lib.project).unwrap();
    assert!(ledger.last_pull.is_some());
}

/// SCENARIO: pulling a project that was never pushed fails with guidance
#[test]
fn scenario_pull_before_push_fails() {
    let lib = TestLibrary::new();
    let result = MirrorUseCase::new(lib.env.clone())
        .pull_project(&lib.project)
        .unwrap();

    assert!(!result.success);
    assert!(result.message.contains("contextmark push"));
    assert!(!lib.project_path("CLAUDE.md").exists());
}
