//! ContextMark CLI - versioned context library for AI coding assistants
//!
//! Usage: contextmark <COMMAND>
//!
//! Commands:
//!   init-library  Create the context library
//!   init          Generate CLAUDE.md for the current project
//!   status        Show block drift and sync state
//!   update        Regenerate when library blocks changed
//!   diff          Compare local files with the library mirror
//!   push / pull   Move context files to or from the library
//!   sync          Sync the library with a Git remote

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use contextmark::domain::entities::SnippetKind;
use contextmark::environment::Environment;

/// Log filter override, EnvFilter syntax
const LOG_ENV: &str = "CONTEXTMARK_LOG";

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("contextmark={}", level))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = Environment::from_process(cli.library.clone())?;
    let cwd = std::env::current_dir()?;
    let json = cli.json;
    let verbose = cli.verbose;

    match cli.command {
        Commands::InitLibrary { force } => commands::library::cmd_init_library(&env, force, json),
        Commands::Init {
            profile,
            blocks,
            no_global,
            dry_run,
            force,
        } => commands::init::cmd_init(
            &env,
            &cwd,
            commands::init::InitArgs {
                profile,
                blocks,
                no_global,
                dry_run,
                force,
            },
            json,
        ),
        Commands::Status { global, all } => {
            if all {
                commands::status::cmd_status_all(&env, json)
            } else if global {
                commands::status::cmd_status_global(&env, json)
            } else {
                commands::status::cmd_status(&env, &cwd, json)
            }
        }
        Commands::Update { all, force } => {
            if all {
                commands::update::cmd_update_all(&env, json)
            } else {
                commands::update::cmd_update(&env, &cwd, force, json)
            }
        }
        Commands::Diff { global } => commands::mirror::cmd_diff(&env, &cwd, global, json, verbose),
        Commands::Push { global } => commands::mirror::cmd_push(&env, &cwd, global, json),
        Commands::Pull { global } => commands::mirror::cmd_pull(&env, &cwd, global, json),
        Commands::AddBlock { slug } => commands::project::cmd_add_block(&env, &cwd, &slug, json),
        Commands::RemoveBlock { slug } => {
            commands::project::cmd_remove_block(&env, &cwd, &slug, json)
        }
        Commands::AddAgent { slug } => {
            commands::project::cmd_add_snippet(&env, &cwd, SnippetKind::Agent, &slug, json)
        }
        Commands::AddCommand { slug } => {
            commands::project::cmd_add_snippet(&env, &cwd, SnippetKind::Command, &slug, json)
        }
        Commands::Blocks => commands::library::cmd_blocks(&env, json),
        Commands::Profiles => commands::library::cmd_profiles(&env, json),
        Commands::Agents => commands::library::cmd_snippets(&env, SnippetKind::Agent, json),
        Commands::Commands => commands::library::cmd_snippets(&env, SnippetKind::Command, json),
        Commands::Sync { action } => commands::sync::cmd_sync(&env, action, json),
    }
}
