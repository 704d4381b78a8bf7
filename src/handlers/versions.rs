//! Version listing, selection, file picking and deletion

use anyhow::{Context, Result};
use colored::Colorize;

use crate::error::ContextError;
use crate::interactive;
use crate::logger;
use crate::session::Session;
use crate::snapshot;

/// Handle `versions`
pub fn handle_list_versions(session: &Session) -> Result<()> {
    let versions = session.available_versions()?;
    if versions.is_empty() {
        println!("{}", "No versions yet. Run 'code-context extract'.".dimmed());
        return Ok(());
    }

    let selected = session.selected_version().ok();
    for version in &versions {
        if Some(version.as_str()) == selected {
            println!("{} {}", "*".green(), version.green().bold());
        } else {
            println!("  {version}");
        }
    }
    Ok(())
}

/// Handle `select VERSION`
pub fn handle_select_version(session: &mut Session, version: &str) -> Result<()> {
    let project = session.project()?;
    if !project.store().contains(version) {
        return Err(ContextError::VersionNotFound {
            version: version.to_string(),
            path: project.paths().organisation_json(version),
        }
        .into());
    }

    session.select_version(version);
    session.set_selected_files(Vec::new());
    println!("{} Selected version {}", "✓".green(), version.bold());
    Ok(())
}

/// Handle `files`
pub fn handle_files(session: &Session) -> Result<()> {
    let files = session
        .files_in_selected_version()
        .context("Failed to load selected version")?;
    let picked = session.selected_files();

    for file in &files {
        if picked.contains(file) {
            println!("{} {}", "+".green(), file.green());
        } else {
            println!("  {file}");
        }
    }
    println!(
        "\n{} of {} files picked",
        picked.len().to_string().bold(),
        files.len()
    );
    Ok(())
}

/// Handle `pick`: choose the files used by `export` and `restore --selected`
pub fn handle_pick_files(
    session: &mut Session,
    paths: Vec<String>,
    all: bool,
    clear: bool,
) -> Result<()> {
    if clear {
        session.set_selected_files(Vec::new());
        println!("{}", "Cleared file selection".yellow());
        return Ok(());
    }

    let available = session.files_in_selected_version()?;
    let picked: Vec<String> = if all {
        available
    } else {
        let (known, unknown): (Vec<String>, Vec<String>) =
            paths.into_iter().partition(|p| available.contains(p));
        for path in &unknown {
            println!(
                "  {} {} is not in version {}",
                "⚠".yellow(),
                path,
                session.selected_version()?
            );
        }
        known
    };

    println!("{} Picked {} files", "✓".green(), picked.len());
    session.set_selected_files(picked);
    Ok(())
}

/// Handle `delete [VERSION]`
pub fn handle_delete_version(
    session: &mut Session,
    version: Option<String>,
    assume_yes: bool,
) -> Result<()> {
    let version = match version {
        Some(version) => version,
        None => session.selected_version()?.to_string(),
    };

    let confirmed = interactive::confirm(
        &format!("Delete version {version}?"),
        "Both snapshot documents of this version will be removed",
        assume_yes,
    )?;
    if !confirmed {
        println!("{}", "Deletion cancelled.".yellow());
        return Ok(());
    }

    session.delete_version(&version)?;
    logger::log_to_file(&format!("Deleted version {version}")).ok();
    println!("{} Deleted version {}", "✓".green(), version.bold());
    Ok(())
}

/// Handle `prune --keep N`
pub fn handle_prune(session: &Session, keep: usize, dry_run: bool) -> Result<()> {
    let store = session.project()?.store();

    if dry_run {
        println!("{}", "Snapshot pruning (dry run)".cyan().bold());
    } else {
        println!("{}", "Pruning old snapshots...".cyan().bold());
    }
    println!("  Store: {}", store.dir().display());
    println!("  Keeping: newest {keep} versions\n");

    let deleted = snapshot::prune(store, keep, dry_run).context("Failed to prune snapshots")?;

    if deleted.is_empty() {
        println!("{}", "No versions to delete".dimmed());
        return Ok(());
    }
    for version in &deleted {
        println!("  - {version}");
    }
    if dry_run {
        println!("{} {} versions would be deleted", "✓".green(), deleted.len());
    } else {
        println!("{} Deleted {} versions", "✓".green(), deleted.len());
    }
    Ok(())
}
