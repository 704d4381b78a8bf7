//! Prompt library commands

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use crate::prompts::{build_prompt, PromptLibrary, PromptTarget};
use crate::session::Session;

#[derive(Subcommand, Debug)]
pub enum PromptCommand {
    /// List templates with their versions
    List,

    /// Show a template and its versions
    Show { name: String },

    /// Add an empty template
    Add { name: String },

    /// Remove a template
    Remove { name: String },

    /// Edit template fields; omitted fields keep their value
    Edit {
        name: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        context_files: Option<String>,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Manage template versions
    Version {
        #[command(subcommand)]
        action: VersionAction,
    },

    /// Print a prompt built from a template version and the picked files
    Build {
        name: String,
        version: String,
        /// How the picked files are referenced
        #[arg(long, value_enum, default_value_t = PromptTarget::Inline)]
        target: PromptTarget,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    List,
    Add { name: String },
    Remove { name: String },
    Rename { old: String, new: String },
}

#[derive(Subcommand, Debug)]
pub enum VersionAction {
    /// Add an empty version to a template
    Add { name: String, version: String },

    /// Remove a version from a template
    Remove { name: String, version: String },

    /// Edit a version's texts; omitted texts keep their value
    Edit {
        name: String,
        version: String,
        #[arg(long)]
        rename: Option<String>,
        #[arg(long, conflicts_with = "before_file")]
        before: Option<String>,
        #[arg(long, conflicts_with = "after_file")]
        after: Option<String>,
        /// Read the "before" text from a file
        #[arg(long)]
        before_file: Option<PathBuf>,
        /// Read the "after" text from a file
        #[arg(long)]
        after_file: Option<PathBuf>,
    },
}

/// Handle `prompt ...`
pub fn handle_prompt(session: &Session, command: PromptCommand) -> Result<()> {
    let mut library = PromptLibrary::open_default().context("Failed to open prompt library")?;

    match command {
        PromptCommand::List => list_templates(&library),
        PromptCommand::Show { name } => show_template(&library, &name),
        PromptCommand::Add { name } => report(library.add_template(&name)?, "Added template", &name),
        PromptCommand::Remove { name } => {
            report(library.delete_template(&name)?, "Removed template", &name)
        }
        PromptCommand::Edit {
            name,
            rename,
            category,
            description,
            context_files,
        } => {
            let current = library
                .template(&name)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown template: {name}"))?;
            let changed = library.update_template(
                &name,
                rename.as_deref().unwrap_or(""),
                category.as_deref().unwrap_or(&current.category),
                description.as_deref().unwrap_or(&current.description),
                context_files.as_deref().unwrap_or(&current.context_files),
            )?;
            report(changed, "Updated template", &name)
        }
        PromptCommand::Category { action } => handle_category(&mut library, action),
        PromptCommand::Version { action } => handle_version(&mut library, action),
        PromptCommand::Build {
            name,
            version,
            target,
        } => {
            let entry = library
                .version(&name, &version)
                .ok_or_else(|| anyhow!("Unknown version {version} of template {name}"))?;
            let text = build_prompt(target, entry, session.selected_files());
            println!("{text}");

            if target == PromptTarget::Attached {
                if let Ok(project) = session.project() {
                    eprintln!(
                        "{} {}",
                        "Attach:".dimmed(),
                        project.paths().selected_context_html().display()
                    );
                }
            }
            Ok(())
        }
    }
}

fn handle_category(library: &mut PromptLibrary, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::List => {
            if library.categories().is_empty() {
                println!("{}", "No categories".dimmed());
            }
            for category in library.categories() {
                println!("  {category}");
            }
            Ok(())
        }
        CategoryAction::Add { name } => {
            report(library.add_category(&name)?, "Added category", &name)
        }
        CategoryAction::Remove { name } => {
            report(library.delete_category(&name)?, "Removed category", &name)
        }
        CategoryAction::Rename { old, new } => {
            report(library.rename_category(&old, &new)?, "Renamed category", &old)
        }
    }
}

fn handle_version(library: &mut PromptLibrary, action: VersionAction) -> Result<()> {
    match action {
        VersionAction::Add { name, version } => report(
            library.add_version(&name, &version)?,
            "Added version",
            &format!("{name}/{version}"),
        ),
        VersionAction::Remove { name, version } => report(
            library.delete_version(&name, &version)?,
            "Removed version",
            &format!("{name}/{version}"),
        ),
        VersionAction::Edit {
            name,
            version,
            rename,
            before,
            after,
            before_file,
            after_file,
        } => {
            let current = library
                .version(&name, &version)
                .cloned()
                .ok_or_else(|| anyhow!("Unknown version {version} of template {name}"))?;
            let before = text_arg(before, before_file)?.unwrap_or(current.before);
            let after = text_arg(after, after_file)?.unwrap_or(current.after);

            let changed = library.update_version(
                &name,
                &version,
                rename.as_deref().unwrap_or(""),
                &before,
                &after,
            )?;
            report(changed, "Updated version", &format!("{name}/{version}"))
        }
    }
}

fn text_arg(inline: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (inline, file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn list_templates(library: &PromptLibrary) -> Result<()> {
    let names = library.template_names();
    if names.is_empty() {
        println!("{}", "No templates. Add one with 'code-context prompt add <NAME>'.".dimmed());
        return Ok(());
    }
    for name in names {
        let versions = library.versions(name);
        println!("{} {}", name.bold(), format!("[{}]", versions.join(", ")).dimmed());
    }
    Ok(())
}

fn show_template(library: &PromptLibrary, name: &str) -> Result<()> {
    let template = library
        .template(name)
        .ok_or_else(|| anyhow!("Unknown template: {name}"))?;

    println!("{}: {}", "Name".bold(), template.name);
    println!("{}: {}", "Category".bold(), template.category);
    println!("{}: {}", "Description".bold(), template.description);
    println!("{}: {}", "Context files".bold(), template.context_files);
    for version in &template.versions {
        println!("\n{} {}", "Version".cyan().bold(), version.version.cyan());
        println!("{}\n{}", "before:".dimmed(), version.before);
        println!("{}\n{}", "after:".dimmed(), version.after);
    }
    Ok(())
}

fn report(changed: bool, action: &str, subject: &str) -> Result<()> {
    if changed {
        println!("{} {} {}", "✓".green(), action, subject.bold());
    } else {
        println!("{} Nothing changed for {}", "⚠".yellow(), subject);
    }
    Ok(())
}
