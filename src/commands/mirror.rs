//! Diff, push and pull between local files and the library mirror

use std::path::Path;

use anyhow::{bail, Result};

use contextmark::application::{MirrorUseCase, SyncResult, TrackedSet};
use contextmark::domain::services::{line_changes, unified_diff, DiffResult, SyncState};
use contextmark::environment::Environment;

use super::emit_json;

fn read_lossy(path: &Path) -> String {
    std::fs::read(path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

pub fn cmd_diff(
    env: &Environment,
    project_dir: &Path,
    global: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let mirror = MirrorUseCase::new(env.clone());
    let (set, diff) = if global {
        (TrackedSet::global(env), mirror.diff_global()?)
    } else {
        (mirror.project_set(project_dir), mirror.diff_project(project_dir)?)
    };

    if json {
        emit_json(serde_json::to_value(&diff)?);
        return Ok(());
    }

    print_diff(&set, &diff, verbose > 0);
    Ok(())
}

fn print_diff(set: &TrackedSet, diff: &DiffResult, show_lines: bool) {
    match diff.state() {
        SyncState::NotSynced => {
            println!("Nothing to compare: no tracked files locally or in the library.");
            return;
        }
        SyncState::InSync => {
            println!("No differences ({} file(s) identical).", diff.identical.len());
            return;
        }
        SyncState::OutOfSync => {}
    }

    for file in &diff.different {
        let library = read_lossy(&set.library_root.join(file));
        let local = read_lossy(&set.local_root.join(file));
        println!("  ~ {} ({})", file, line_changes(&library, &local).summary());
        if show_lines {
            let label_library = format!("library/{}", file);
            print!("{}", unified_diff(&library, &local, &label_library, file));
        }
    }
    for file in &diff.local_only {
        println!("  + {} (local only)", file);
    }
    for file in &diff.library_only {
        println!("  - {} (library only)", file);
    }

    println!();
    println!(
        "{} modified, {} local only, {} library only, {} identical",
        diff.different.len(),
        diff.local_only.len(),
        diff.library_only.len(),
        diff.identical.len()
    );
}

fn report(result: &SyncResult, json: bool) -> Result<()> {
    if json {
        emit_json(serde_json::to_value(result)?);
    } else {
        println!("{}", result.message);
        for file in &result.files_changed {
            println!("  {}", file);
        }
    }

    if !result.success {
        bail!("{}", result.message);
    }
    Ok(())
}

pub fn cmd_push(env: &Environment, project_dir: &Path, global: bool, json: bool) -> Result<()> {
    let mirror = MirrorUseCase::new(env.clone());
    let result = if global {
        mirror.push_global()?
    } else {
        mirror.push_project(project_dir)?
    };
    report(&result, json)
}

pub fn cmd_pull(env: &Environment, project_dir: &Path, global: bool, json: bool) -> Result<()> {
    let mirror = MirrorUseCase::new(env.clone());
    let result = if global {
        mirror.pull_global()?
    } else {
        mirror.pull_project(project_dir)?
    };
    report(&result, json)
}
