//! Project selection, extraction and exclusion display

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::exclusion::ExclusionRules;
use crate::logger;
use crate::session::Session;
use crate::settings::Settings;

/// Handle `project PATH`
pub fn handle_select_project(session: &mut Session, path: &Path, settings: &Settings) -> Result<()> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Project not found: {}", path.display()))?;
    session
        .select_project(&root, settings)
        .with_context(|| format!("Failed to open project: {}", root.display()))?;

    let project = session.project()?;
    println!(
        "{} Selected project {}",
        "✓".green(),
        root.display().to_string().cyan()
    );
    println!(
        "  {} {}",
        "Store:".dimmed(),
        project.paths().store_dir().display()
    );
    Ok(())
}

/// Handle `extract`: scan, save and export the whole project
pub fn handle_extract(session: &mut Session) -> Result<()> {
    println!("{}", "Scanning project...".cyan());

    let snapshot = session
        .extract_full_project()
        .context("Failed to extract project")?;
    let version = &snapshot.version;

    let project = session.project()?;
    logger::log_to_file(&format!(
        "Extracted version {version} of {}",
        project.root().display()
    ))
    .ok();
    println!(
        "{} Created version {} ({} files)",
        "✓".green(),
        version.bold(),
        snapshot.file_count()
    );
    println!("  {} {}", "Markdown:".dimmed(), project.paths().context_md().display());
    println!("  {} {}", "HTML:".dimmed(), project.paths().context_html().display());
    Ok(())
}

/// Handle `status`: show the current selection
pub fn handle_status(session: &Session) -> Result<()> {
    let Ok(project) = session.project() else {
        println!("{}", "No project selected. Run 'code-context project <PATH>'.".yellow());
        return Ok(());
    };

    println!("{}: {}", "Project".bold(), project.root().display());
    println!(
        "{}: {}",
        "Version".bold(),
        session.selected_version().unwrap_or("none")
    );
    let files = session.selected_files();
    println!("{}: {}", "Selected files".bold(), files.len());
    for file in files {
        println!("  - {file}");
    }
    Ok(())
}

/// Handle `exclusions`: list the rules that the next scan would apply
pub fn handle_exclusions(session: &Session) -> Result<()> {
    let project = session.project()?;
    let exclude_file = project.paths().exclude_file();

    let mut rules: ExclusionRules = project.rules().clone();
    rules
        .load_file(&exclude_file)
        .with_context(|| format!("Failed to read {}", exclude_file.display()))?;

    println!("{}", "Built-in exclusions:".bold());
    for rule in rules.defaults() {
        println!("  - {rule}");
    }
    println!(
        "{} {}",
        "Custom exclusions from".bold(),
        exclude_file.display().to_string().cyan()
    );
    if rules.custom().is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for rule in rules.custom() {
        println!("  - {rule}");
    }
    println!(
        "\n{} distinct rules in effect. {}",
        rules.all().len().to_string().bold(),
        "Rules match a file or folder name that equals or starts with them.".dimmed()
    );
    Ok(())
}
