//! `sync` subcommands - keep the library in step with its Git remote

use anyhow::{bail, Result};
use serde_json::json;

use contextmark::application::{PullOutcome, PushOutcome, RemoteSyncUseCase};
use contextmark::environment::Environment;
use contextmark::infrastructure::GitCli;

use super::emit_json;
use crate::cli::SyncAction;

pub fn cmd_sync(env: &Environment, action: SyncAction, json: bool) -> Result<()> {
    if !GitCli::check_available() {
        bail!("git is not installed or not on PATH");
    }
    let remote = RemoteSyncUseCase::new(env.clone(), GitCli::new(env.library().root()));

    match action {
        SyncAction::Setup { remote: url } => setup(&remote, &url, json),
        SyncAction::Status => status(&remote, json),
        SyncAction::Push { message } => push(&remote, message.as_deref(), json),
        SyncAction::Pull => pull(&remote, json),
    }
}

fn setup(remote: &RemoteSyncUseCase<GitCli>, url: &str, json: bool) -> Result<()> {
    let outcome = remote.setup(url)?;

    if json {
        emit_json(json!({
            "type": "sync_setup",
            "remote": url,
            "initializedRepo": outcome.initialized_repo,
            "previousRemote": outcome.previous_remote,
            "initialCommit": outcome.initial_commit,
            "pushed": outcome.pushed,
            "pushHint": outcome.push_hint,
        }));
        return Ok(());
    }

    if outcome.initialized_repo {
        println!("Initialized Git repository in library");
    }
    match &outcome.previous_remote {
        Some(previous) if previous != url => println!("Remote changed: {} -> {}", previous, url),
        _ => println!("Remote set: {}", url),
    }
    if outcome.initial_commit {
        println!("Created initial commit");
    }
    if outcome.pushed {
        println!("Pushed to remote");
    } else if let Some(hint) = &outcome.push_hint {
        println!("Initial push failed: {}", hint);
        println!("  Make sure the remote repository exists, then run 'contextmark sync push'.");
    }
    println!();
    println!("Sync configured.");
    Ok(())
}

fn status(remote: &RemoteSyncUseCase<GitCli>, json: bool) -> Result<()> {
    let status = remote.status()?;

    if json {
        emit_json(json!({ "type": "sync_status", "status": status }));
        return Ok(());
    }

    if !status.is_repo {
        println!("Library is not a Git repository.");
        println!("  Run 'contextmark sync setup <remote>' to enable sync.");
        return Ok(());
    }

    println!("Remote: {}", status.remote.as_deref().unwrap_or("(none)"));
    println!("Branch: {}", status.branch.as_deref().unwrap_or("(unknown)"));
    if status.ahead > 0 {
        println!("  {} commit(s) ahead of remote", status.ahead);
    }
    if status.behind > 0 {
        println!("  {} commit(s) behind remote", status.behind);
    }
    if status.has_changes {
        println!("Uncommitted changes:");
        for file in &status.changed_files {
            println!("  {}", file);
        }
    }
    if status.ahead == 0 && status.behind == 0 && !status.has_changes {
        println!("Library is in sync with remote.");
    }
    Ok(())
}

fn push(remote: &RemoteSyncUseCase<GitCli>, message: Option<&str>, json: bool) -> Result<()> {
    let outcome = remote.push(message)?;

    if let PushOutcome::NotConfigured(reason) = &outcome {
        bail!("{}", reason);
    }

    if json {
        let (pushed, committed, ahead) = match &outcome {
            PushOutcome::Pushed { committed, ahead } => (true, committed.clone(), *ahead),
            _ => (false, None, 0),
        };
        emit_json(json!({
            "type": "sync_push",
            "pushed": pushed,
            "committed": committed,
            "ahead": ahead,
        }));
        return Ok(());
    }

    match outcome {
        PushOutcome::Pushed { committed, .. } => {
            if let Some(message) = committed {
                println!("Committed: {}", message);
            }
            println!("Pushed library to remote");
        }
        _ => println!("Nothing to push."),
    }
    Ok(())
}

fn pull(remote: &RemoteSyncUseCase<GitCli>, json: bool) -> Result<()> {
    let outcome = remote.pull()?;

    let (pulled, behind, uncommitted_changes) = match outcome {
        PullOutcome::NotConfigured(reason) => bail!("{}", reason),
        PullOutcome::UpToDate {
            uncommitted_changes,
        } => (false, 0, uncommitted_changes),
        PullOutcome::Pulled {
            behind,
            uncommitted_changes,
        } => (true, behind, uncommitted_changes),
    };

    if json {
        emit_json(json!({
            "type": "sync_pull",
            "pulled": pulled,
            "behind": behind,
            "uncommittedChanges": uncommitted_changes,
        }));
        return Ok(());
    }

    if uncommitted_changes {
        println!("Warning: library has uncommitted changes.");
    }
    if pulled {
        println!("Pulled {} commit(s) from remote", behind);
    } else {
        println!("Already up to date.");
    }
    Ok(())
}
