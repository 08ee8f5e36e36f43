//! Status command - block drift and mirror sync state

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use contextmark::application::{MirrorUseCase, ProjectUseCase};
use contextmark::domain::services::{DiffResult, DriftStatus, SyncState};
use contextmark::environment::Environment;

use super::emit_json;

fn print_file_states(diff: &DiffResult) {
    for file in &diff.different {
        println!("  modified  {}", file);
    }
    for file in &diff.local_only {
        println!("  local     {}", file);
    }
    for file in &diff.library_only {
        println!("  library   {}", file);
    }
    for file in &diff.identical {
        println!("  synced    {}", file);
    }
}

pub fn cmd_status(env: &Environment, project_dir: &Path, json: bool) -> Result<()> {
    let drift = ProjectUseCase::new(env.clone()).drift(project_dir)?;
    let sync = MirrorUseCase::new(env.clone()).project_sync_status(project_dir)?;
    let config = &drift.config;

    if json {
        emit_json(json!({
            "type": "status",
            "project": config.project,
            "profile": config.profile,
            "generatedAt": config.generated_at,
            "lastPush": config.last_push,
            "lastPull": config.last_pull,
            "needsUpdate": drift.needs_update(),
            "blocks": drift.statuses,
            "sync": sync,
        }));
        return Ok(());
    }

    println!("Project:   {}", config.project);
    println!(
        "Profile:   {}",
        config.profile.as_deref().unwrap_or("none (explicit blocks)")
    );
    println!("Generated: {}", config.generated_at.to_rfc3339());
    if let Some(at) = config.last_push {
        println!("Last push: {}", at.to_rfc3339());
    }
    if let Some(at) = config.last_pull {
        println!("Last pull: {}", at.to_rfc3339());
    }
    println!();

    if !drift.statuses.is_empty() {
        println!("Blocks:");
        for status in &drift.statuses {
            println!(
                "  {:<28} {:<9} {:<9} {}",
                status.block_slug, status.local_version, status.library_version, status.status
            );
        }
        let outdated = drift.outdated().len();
        let missing = drift
            .statuses
            .iter()
            .filter(|s| s.status == DriftStatus::Missing)
            .count();
        if outdated > 0 {
            println!();
            println!("{} block(s) need updating. Run 'contextmark update' to apply.", outdated);
        }
        if missing > 0 {
            println!("{} block(s) missing from library.", missing);
        }
        println!();
    }

    match &sync.diff {
        None => {
            println!("Project not yet in library.");
            println!("  Run 'contextmark push' to save it.");
        }
        Some(diff) if diff.has_diff => {
            print_file_states(diff);
            println!();
            println!("Local and library are out of sync.");
            println!("  contextmark push  - update library with local changes");
            println!("  contextmark pull  - update local with library changes");
            println!("  contextmark diff  - see detailed differences");
        }
        Some(_) => println!("Local and library are in sync."),
    }
    Ok(())
}

pub fn cmd_status_global(env: &Environment, json: bool) -> Result<()> {
    let diff = MirrorUseCase::new(env.clone()).diff_global()?;

    if json {
        emit_json(json!({ "type": "status_global", "state": diff.state(), "diff": diff }));
        return Ok(());
    }

    match diff.state() {
        SyncState::NotSynced => {
            println!("No global config found in library.");
            println!("  Run 'contextmark push --global' to save your config.");
        }
        SyncState::InSync => println!("Global config is in sync with library."),
        SyncState::OutOfSync => {
            print_file_states(&diff);
            println!();
            println!("Global config is out of sync with library.");
            println!("  contextmark push --global  - update library");
            println!("  contextmark pull --global  - update local");
        }
    }
    Ok(())
}

pub fn cmd_status_all(env: &Environment, json: bool) -> Result<()> {
    env.require_library()?;
    let projects = MirrorUseCase::new(env.clone()).list_library_projects()?;

    if json {
        emit_json(json!({ "type": "status_all", "count": projects.len(), "projects": projects }));
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects in library yet.");
        println!("  Run 'contextmark push' in a project to get started.");
        return Ok(());
    }

    for project in &projects {
        println!("  {}", project);
    }
    println!();
    println!("{} project(s) in library", projects.len());
    Ok(())
}
