//! Update command - regenerate projects whose blocks changed

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use contextmark::application::{GenerateUseCase, ProjectUpdateResult};
use contextmark::environment::Environment;

use super::emit_json;

pub fn cmd_update(env: &Environment, project_dir: &Path, force: bool, json: bool) -> Result<()> {
    let outcome = GenerateUseCase::new(env.clone()).update(project_dir, force)?;
    let outdated = outcome.outdated();

    if json {
        emit_json(json!({
            "type": "update",
            "updated": outcome.report.is_some(),
            "outdated": outdated,
        }));
        return Ok(());
    }

    let Some(report) = &outcome.report else {
        println!("All blocks are up to date.");
        return Ok(());
    };

    println!("CLAUDE.md updated");
    match &report.config.profile {
        Some(profile) => println!("  Profile: {}", profile),
        None => println!("  Profile: none (explicit blocks)"),
    }
    println!("  Blocks updated: {}", outdated.len());
    for status in &outdated {
        println!(
            "  {}: {} -> {}",
            status.block_slug, status.local_version, status.library_version
        );
    }
    Ok(())
}

pub fn cmd_update_all(env: &Environment, json: bool) -> Result<()> {
    let results = GenerateUseCase::new(env.clone()).update_all(env.home())?;

    if json {
        let items: Vec<_> = results
            .iter()
            .map(|r| {
                let (status, detail) = match &r.result {
                    ProjectUpdateResult::Current => ("current", json!(null)),
                    ProjectUpdateResult::Updated { outdated } => ("updated", json!(outdated)),
                    ProjectUpdateResult::Failed { message } => ("failed", json!(message)),
                };
                json!({ "path": r.path.display().to_string(), "status": status, "detail": detail })
            })
            .collect();
        emit_json(json!({ "type": "update_all", "count": items.len(), "projects": items }));
        return Ok(());
    }

    if results.is_empty() {
        println!("No projects found with .contextmark.yml");
        return Ok(());
    }

    let mut updated = 0;
    for entry in &results {
        let line = match &entry.result {
            ProjectUpdateResult::Current => "current".to_string(),
            ProjectUpdateResult::Updated { outdated } => {
                updated += 1;
                format!("updated ({} block(s))", outdated)
            }
            ProjectUpdateResult::Failed { message } => format!("failed: {}", message),
        };
        println!("  {:<50} {}", entry.path.display(), line);
    }
    println!();
    println!("{} of {} project(s) updated", updated, results.len());
    Ok(())
}
