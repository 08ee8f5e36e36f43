//! Init command - generate CLAUDE.md and start tracking a project

use std::path::Path;

use anyhow::Result;
use serde_json::json;

use contextmark::application::GenerateUseCase;
use contextmark::domain::services::{BlockSource, RenderOptions};
use contextmark::environment::Environment;
use contextmark::infrastructure::YamlConfigRepository;

use super::emit_json;

const PREVIEW_LINES: usize = 30;

#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    pub profile: Option<String>,
    pub blocks: Option<String>,
    pub no_global: bool,
    pub dry_run: bool,
    pub force: bool,
}

pub fn cmd_init(env: &Environment, project_dir: &Path, args: InitArgs, json: bool) -> Result<()> {
    env.require_library()?;
    let configs = YamlConfigRepository::new();

    if configs.is_project_initialized(project_dir) && !args.force && !args.dry_run {
        if json {
            emit_json(json!({
                "type": "init",
                "initialized": false,
                "reason": "already_initialized",
            }));
        } else {
            println!("Project already initialized with ContextMark.");
            println!("  Use 'contextmark update' to refresh.");
            println!("  Use --force to reinitialize.");
        }
        return Ok(());
    }

    let source = match (args.profile, args.blocks) {
        (_, Some(list)) => BlockSource::explicit_from_csv(&list),
        (Some(profile), None) => BlockSource::Profile(profile),
        (None, None) => {
            let config = configs.load_global_or_default(&env.library().config_file())?;
            BlockSource::Profile(config.default_profile)
        }
    };
    let options = RenderOptions {
        include_global: !args.no_global,
    };
    let use_case = GenerateUseCase::new(env.clone());

    if args.dry_run {
        let document = use_case.preview(&source, options)?;
        if json {
            emit_json(json!({
                "type": "preview",
                "content": document.content,
                "blocks": document.rendered_slugs(),
                "missing": document.missing,
            }));
            return Ok(());
        }

        let lines: Vec<&str> = document.content.lines().collect();
        println!("Preview (dry-run):");
        println!();
        for line in lines.iter().take(PREVIEW_LINES) {
            println!("{}", line);
        }
        if lines.len() > PREVIEW_LINES {
            println!();
            println!("... ({} more lines)", lines.len() - PREVIEW_LINES);
        }
        println!();
        println!("No files were written (dry-run mode).");
        return Ok(());
    }

    let report = use_case.write_and_track(project_dir, &source, options)?;

    if json {
        emit_json(json!({
            "type": "init",
            "initialized": true,
            "project": report.config.project,
            "profile": report.config.profile,
            "blocks": report.config.block_slugs(),
            "missing": report.document.missing,
            "skipped": report.skipped_snippets,
        }));
        return Ok(());
    }

    println!("Project initialized: {}", report.config.project);
    match &report.config.profile {
        Some(profile) => println!("  Profile: {}", profile),
        None => println!("  Profile: none (explicit blocks)"),
    }
    println!("  Blocks:  {}", report.config.blocks.len());
    for slug in &report.document.missing {
        println!("  missing: {} (not in library)", slug);
    }
    for slug in &report.skipped_snippets {
        println!("  skipped: {} (not in library)", slug);
    }
    println!();
    println!("Files written:");
    println!("  CLAUDE.md         - generated context");
    println!("  .contextmark.yml  - tracking config");
    Ok(())
}
