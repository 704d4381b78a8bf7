//! Export of the picked files

use anyhow::{Context, Result};
use colored::Colorize;

use crate::session::Session;

/// Handle `export`: write `selected_context.md` and `selected_context.html`
pub fn handle_export_selected(session: &Session) -> Result<()> {
    if session.selected_files().is_empty() {
        println!(
            "{}",
            "No files picked; the exported documents will be empty. Use 'code-context pick'."
                .yellow()
        );
    }

    let filtered = session
        .export_selected_context()
        .context("Failed to export selected context")?;

    let paths = session.project()?.paths();
    println!(
        "{} Exported {} files from version {}",
        "✓".green(),
        filtered.file_count(),
        filtered.version.bold()
    );
    println!("  {} {}", "Markdown:".dimmed(), paths.selected_context_md().display());
    println!("  {} {}", "HTML:".dimmed(), paths.selected_context_html().display());
    Ok(())
}
