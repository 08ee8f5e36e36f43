//! Scenario: First-Time User Setup
//!
//! Journey: a developer with no library sets up ContextMark from the CLI.
//!
//! Steps:
//! 1. Runs `contextmark init` before a library exists and is told what to do
//! 2. Runs `contextmark init-library`
//! 3. Generates CLAUDE.md in a project
//! 4. Checks status, pushes, and sees the project in `status --all`
//!
//! Success Criteria:
//! - Every error names the command that fixes it
//! - Final state: a tracked project mirrored in the library

use crate::common::*;

#[test]
fn scenario_first_time_user_complete_journey() {
    let lib = TestLibrary::bare();

    // Step 1: no library yet
    let result = lib.run(&["init"]);
    assert!(!result.success, "init without a library must fail");
    assert_eq!(result.exit_code, 1);
    crate::assert_output_contains!(result, "contextmark init-library");

    // Step 2: create the library
    let result = lib.run(&["init-library"]);
    assert!(result.success, "init-library failed:\n{}", result.combined_output());
    crate::assert_output_contains!(result, "Library initialized");
    assert!(lib.home_path(".contextmark/config.yml").is_file());
    assert!(lib.home_path(".contextmark/blocks/style/code.md").is_file());

    // Step 3: generate with the default profile
    let result = lib.run(&["init"]);
    assert!(result.success, "init failed:\n{}", result.combined_output());
    let context = lib.read_project_file("CLAUDE.md");
    assert!(context.contains("## Code Style"));
    assert!(lib.project_path(".contextmark.yml").is_file());

    // Step 4: status, push, status --all
    let result = lib.run(&["status"]);
    assert!(result.success);
    crate::assert_output_contains!(result, "style/code");
    crate::assert_output_contains!(result, "current");
    crate::assert_output_contains!(result, "Project not yet in library");

    let result = lib.run(&["push"]);
    assert!(result.success, "push failed:\n{}", result.combined_output());
    crate::assert_output_contains!(result, "Pushed 1 file(s) to library");

    let result = lib.run(&["status", "--all"]);
    assert!(result.success);
    crate::assert_output_contains!(result, "app");
    crate::assert_output_contains!(result, "1 project(s) in library");
}

#[test]
fn scenario_reinit_without_force_is_informational() {
    let lib = TestLibrary::new();
    assert!(lib.run(&["init"]).success);

    let result = lib.run(&["init"]);
    assert!(result.success);
    crate::assert_output_contains!(result, "already initialized");
}
