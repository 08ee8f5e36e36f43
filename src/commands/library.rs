//! Library commands: bootstrap and listings

use anyhow::Result;
use serde_json::json;

use contextmark::application::{InitLibraryOutcome, LibraryUseCase};
use contextmark::domain::entities::SnippetKind;
use contextmark::environment::Environment;
use contextmark::infrastructure::fs::display_with_tilde;
use contextmark::infrastructure::FsContentStore;

use super::emit_json;

pub fn cmd_init_library(env: &Environment, force: bool, json: bool) -> Result<()> {
    let outcome = LibraryUseCase::new(env.clone()).init(force)?;
    let root = display_with_tilde(env.library().root());

    if json {
        emit_json(json!({
            "type": "init_library",
            "library": env.library().root().display().to_string(),
            "created": outcome == InitLibraryOutcome::Created,
        }));
        return Ok(());
    }

    match outcome {
        InitLibraryOutcome::Created => {
            println!("Library initialized at {}", root);
            println!();
            println!("Next steps:");
            println!("  contextmark blocks          - list available blocks");
            println!("  contextmark init            - generate CLAUDE.md in a project");
        }
        InitLibraryOutcome::AlreadyInitialized => {
            println!("Library already exists at {}", root);
            println!("  Use --force to reinitialize.");
        }
    }
    Ok(())
}

fn store(env: &Environment) -> Result<FsContentStore> {
    env.require_library()?;
    Ok(FsContentStore::new(env.library().clone()))
}

pub fn cmd_blocks(env: &Environment, json: bool) -> Result<()> {
    let categories = store(env)?.list_blocks_by_category()?;

    if json {
        let items: Vec<_> = categories
            .iter()
            .flat_map(|c| &c.blocks)
            .map(|b| {
                json!({
                    "slug": b.slug,
                    "name": b.frontmatter.name,
                    "description": b.frontmatter.description,
                    "version": b.version(),
                    "tags": b.frontmatter.tags,
                    "hash": b.hash.as_str(),
                })
            })
            .collect();
        emit_json(json!({ "type": "blocks", "count": items.len(), "blocks": items }));
        return Ok(());
    }

    if categories.is_empty() {
        println!("No blocks in library.");
        return Ok(());
    }

    let mut total = 0;
    for category in &categories {
        println!("{}/", category.name);
        for block in &category.blocks {
            println!(
                "  {:<28} v{:<8} {}",
                block.slug,
                block.version(),
                block.frontmatter.description
            );
        }
        total += category.blocks.len();
    }
    println!();
    println!("{} block(s) in {} category(ies)", total, categories.len());
    Ok(())
}

pub fn cmd_profiles(env: &Environment, json: bool) -> Result<()> {
    let profiles = store(env)?.list_profiles()?;

    if json {
        let items: Vec<_> = profiles
            .iter()
            .map(|p| {
                json!({
                    "slug": p.slug,
                    "name": p.config.name,
                    "description": p.config.description,
                    "blocks": p.config.blocks,
                    "agents": p.config.agents,
                    "commands": p.config.commands,
                })
            })
            .collect();
        emit_json(json!({ "type": "profiles", "count": items.len(), "profiles": items }));
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles in library.");
        return Ok(());
    }

    for profile in &profiles {
        println!(
            "{:<20} {} ({} blocks)",
            profile.slug,
            profile.config.description,
            profile.config.blocks.len()
        );
    }
    Ok(())
}

pub fn cmd_snippets(env: &Environment, kind: SnippetKind, json: bool) -> Result<()> {
    let snippets = store(env)?.list_snippets(kind)?;
    let plural = kind.library_dir();

    if json {
        let items: Vec<_> = snippets
            .iter()
            .map(|s| {
                json!({
                    "slug": s.slug,
                    "name": s.frontmatter.name,
                    "description": s.frontmatter.description,
                })
            })
            .collect();
        emit_json(json!({ "type": plural, "count": items.len(), plural: items }));
        return Ok(());
    }

    if snippets.is_empty() {
        println!("No {} in library.", plural);
        return Ok(());
    }

    for snippet in &snippets {
        println!("{:<20} {}", snippet.slug, snippet.frontmatter.description);
    }
    Ok(())
}
