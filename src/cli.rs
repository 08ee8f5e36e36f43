use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ContextMark - versioned context library for AI coding assistants
#[derive(Parser, Debug)]
#[command(name = "contextmark")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Library root (default: ~/.contextmark or $CONTEXTMARK_LIBRARY)
    #[arg(long, global = true, value_name = "PATH")]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the context library
    InitLibrary {
        /// Rewrite starter files even if the library exists
        #[arg(short, long)]
        force: bool,
    },

    /// Generate CLAUDE.md for the current project
    Init {
        /// Profile to compose (default: the library's default profile)
        #[arg(short, long, conflicts_with = "blocks")]
        profile: Option<String>,

        /// Comma-separated blocks to compose instead of a profile
        #[arg(short, long, value_name = "LIST")]
        blocks: Option<String>,

        /// Leave out the global context
        #[arg(long)]
        no_global: bool,

        /// Print the document without writing files
        #[arg(long)]
        dry_run: bool,

        /// Reinitialize an initialized project
        #[arg(short, long)]
        force: bool,
    },

    /// Show block drift and sync state
    Status {
        /// Global config (~/.claude) instead of the current project
        #[arg(long, conflicts_with = "all")]
        global: bool,

        /// Every project mirrored in the library
        #[arg(short, long)]
        all: bool,
    },

    /// Regenerate when library blocks changed
    Update {
        /// Every tracked project below the home directory
        #[arg(short, long)]
        all: bool,

        /// Regenerate even if every block is current
        #[arg(short, long)]
        force: bool,
    },

    /// Compare local files with the library mirror
    Diff {
        /// Global config (~/.claude) instead of the current project
        #[arg(long)]
        global: bool,
    },

    /// Copy local context files into the library
    Push {
        #[arg(long)]
        global: bool,
    },

    /// Restore context files from the library
    Pull {
        #[arg(long)]
        global: bool,
    },

    /// Track a library block in the current project
    AddBlock { slug: String },

    /// Stop tracking a block in the current project
    RemoveBlock { slug: String },

    /// Install a library agent into .claude/skills
    AddAgent { slug: String },

    /// Install a library command into .claude/commands
    AddCommand { slug: String },

    /// List library blocks by category
    Blocks,

    /// List library profiles
    Profiles,

    /// List library agents
    Agents,

    /// List library commands
    Commands,

    /// Sync the library with a Git remote
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncAction {
    /// Initialize Git and set the remote
    Setup { remote: String },

    /// Show branch, remote and ahead/behind
    Status,

    /// Commit library changes and push
    Push {
        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Pull library changes
    Pull,
}
