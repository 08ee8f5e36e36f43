//! Ledger edits: add/remove blocks, install agents and commands

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use contextmark::application::{AddOutcome, ProjectUseCase};
use contextmark::domain::entities::SnippetKind;
use contextmark::environment::Environment;

use super::emit_json;

pub fn cmd_add_block(env: &Environment, project_dir: &Path, slug: &str, json: bool) -> Result<()> {
    let outcome = ProjectUseCase::new(env.clone()).add_block(project_dir, slug)?;
    let added = outcome == AddOutcome::Added;

    if json {
        emit_json(json!({ "type": "add_block", "block": slug, "added": added }));
        return Ok(());
    }

    if added {
        println!("Block '{}' added to .contextmark.yml", slug);
        println!("  Run 'contextmark update --force' to regenerate CLAUDE.md.");
    } else {
        println!("Block '{}' is already tracked.", slug);
    }
    Ok(())
}

pub fn cmd_remove_block(
    env: &Environment,
    project_dir: &Path,
    slug: &str,
    json: bool,
) -> Result<()> {
    let removed = ProjectUseCase::new(env.clone()).remove_block(project_dir, slug)?;

    if json {
        emit_json(json!({ "type": "remove_block", "block": slug, "removed": removed }));
        return Ok(());
    }

    if removed {
        println!("Block '{}' removed from .contextmark.yml", slug);
        println!("  Run 'contextmark update --force' to regenerate CLAUDE.md.");
    } else {
        println!("Block '{}' was not tracked.", slug);
    }
    Ok(())
}

pub fn cmd_add_snippet(
    env: &Environment,
    project_dir: &Path,
    kind: SnippetKind,
    slug: &str,
    json: bool,
) -> Result<()> {
    let install = ProjectUseCase::new(env.clone()).add_snippet(project_dir, kind, slug)?;
    let added = install.outcome == AddOutcome::Added;

    if json {
        emit_json(json!({
            "type": "add_snippet",
            "kind": kind.library_dir(),
            "slug": slug,
            "added": added,
            "path": install.path.display().to_string(),
        }));
        return Ok(());
    }

    if added {
        println!("{} '{}' installed", kind.label(), slug);
        println!("  {}", install.path.display());
    } else {
        println!("{} '{}' is already installed.", kind.label(), slug);
    }
    Ok(())
}
