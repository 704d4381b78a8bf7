//! Restore handler
//!
//! Writes the files of the selected version back into the project, after a
//! confirmation prompt when running interactively.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::interactive;
use crate::logger;
use crate::session::Session;

/// Handle `restore [--selected]`
pub fn handle_restore(session: &Session, selected_only: bool, assume_yes: bool) -> Result<()> {
    let version = session.selected_version()?;
    let root = session.project()?.root();

    let (message, help) = if selected_only {
        (
            format!(
                "Restore {} picked files from version {version}?",
                session.selected_files().len()
            ),
            "Picked files in the project will be overwritten",
        )
    } else {
        (
            format!("Restore every file of version {version}?"),
            "Files in the project will be overwritten with the snapshot content",
        )
    };

    if !interactive::confirm(&message, help, assume_yes)? {
        println!("\n{}", "Restore cancelled.".yellow());
        return Ok(());
    }

    println!("{}", format!("Restoring into {}...", root.display()).cyan());
    let written = if selected_only {
        session.restore_selected_files()
    } else {
        session.restore_full_version()
    }
    .context("Failed to restore files")?;

    logger::log_to_file(&format!(
        "Restored {written} files of version {version} into {}",
        root.display()
    ))
    .ok();

    println!("\n{}", "SUCCESS".green().bold());
    println!("Restored {written} files from version {version}");
    Ok(())
}
