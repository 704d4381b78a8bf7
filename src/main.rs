use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use code_context::handlers::{self, prompts::PromptCommand};
use code_context::logger;
use code_context::session::SessionState;
use code_context::settings::{self, Settings};

#[derive(Parser)]
#[command(name = "code-context")]
#[command(about = "Snapshot a project into versioned JSON, export it as Markdown/HTML and restore files", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root to use instead of the remembered one
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Show informational log messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the project to work on
    Project {
        /// Path to the project root
        path: PathBuf,
    },

    /// Show the current project, version and picked files
    Status,

    /// Snapshot the whole project as a new version and export it
    Extract,

    /// List the versions of the project
    Versions,

    /// Select a version
    Select {
        /// Version identifier, e.g. 003
        version: String,
    },

    /// List the files of the selected version
    Files,

    /// Pick files of the selected version for export and restore
    Pick {
        /// Relative file paths as listed by 'files'
        paths: Vec<String>,

        /// Pick every file of the version
        #[arg(long, conflicts_with_all = ["paths", "clear"])]
        all: bool,

        /// Clear the picked files
        #[arg(long, conflicts_with = "paths")]
        clear: bool,
    },

    /// Export the picked files as selected_context.md / .html
    Export,

    /// Write files of the selected version back into the project
    Restore {
        /// Restore only the picked files
        #[arg(long)]
        selected: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete a version (the selected one by default)
    Delete {
        version: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all but the newest versions
    Prune {
        /// Number of versions to keep
        #[arg(long, default_value_t = 10)]
        keep: usize,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the exclusion rules of the project
    Exclusions,

    /// Configure settings
    Config {
        /// Name of the store folder created inside each project
        #[arg(long)]
        store_dir: Option<String>,

        /// Extra names excluded from every scan (comma-separated)
        #[arg(long)]
        extra_excludes: Option<String>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },

    /// Manage prompt templates
    Prompt {
        #[command(subcommand)]
        command: PromptCommand,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose) {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    // Settings are edited without opening a project
    let command = match cli.command {
        Commands::Config {
            store_dir,
            extra_excludes,
            show,
        } => {
            if show || (store_dir.is_none() && extra_excludes.is_none()) {
                settings::show_settings()?;
            } else {
                settings::update_settings(store_dir, extra_excludes)?;
            }
            return Ok(());
        }
        other => other,
    };

    let settings = Settings::load()?;
    // Selecting a project starts from a clean selection
    let state = if matches!(command, Commands::Project { .. }) {
        SessionState::default()
    } else {
        SessionState::load()?
    };
    let mut session = state.into_session(cli.project.as_deref(), &settings)?;

    match command {
        Commands::Project { path } => {
            handlers::handle_select_project(&mut session, &path, &settings)?;
        }
        Commands::Status => handlers::handle_status(&session)?,
        Commands::Extract => handlers::handle_extract(&mut session)?,
        Commands::Versions => handlers::handle_list_versions(&session)?,
        Commands::Select { version } => handlers::handle_select_version(&mut session, &version)?,
        Commands::Files => handlers::handle_files(&session)?,
        Commands::Pick { paths, all, clear } => {
            handlers::handle_pick_files(&mut session, paths, all, clear)?;
        }
        Commands::Export => handlers::handle_export_selected(&session)?,
        Commands::Restore { selected, yes } => handlers::handle_restore(&session, selected, yes)?,
        Commands::Delete { version, yes } => {
            handlers::handle_delete_version(&mut session, version, yes)?;
        }
        Commands::Prune { keep, dry_run } => handlers::handle_prune(&session, keep, dry_run)?,
        Commands::Exclusions => handlers::handle_exclusions(&session)?,
        Commands::Prompt { command } => handlers::handle_prompt(&session, command)?,
        Commands::Config { .. } => unreachable!("config is handled before the session is loaded"),
    }

    SessionState::from_session(&session).save()?;

    Ok(())
}
