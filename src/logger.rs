use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::config::ConfigManager;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Initialize the logging system
///
/// Console output goes to stderr so command output stays pipeable. The level is
/// taken from `RUST_LOG` (`error`, `warn`, `info`, `debug`, `trace`, `off`) and
/// defaults to `warn`, or `info` with `--verbose`.
///
/// Every session start is also appended to `code-context.log` in the config
/// directory, which is rotated once it grows past 10MB.
pub fn init_logger(verbose: bool) -> Result<()> {
    ConfigManager::ensure_config_dir()?;
    rotate_log_if_needed()?;

    let fallback = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(fallback);

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init()
        .ok(); // Already initialized in tests

    log_to_file(&format!("Logger initialized with level: {level:?}"))?;

    Ok(())
}

/// Append a timestamped line to the log file
pub fn log_to_file(message: &str) -> Result<()> {
    append_line(&ConfigManager::log_file_path()?, message)
}

fn append_line(log_path: &Path, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        message
    )?;

    Ok(())
}

/// Rotate the log file if it exceeds 10MB
pub fn rotate_log_if_needed() -> Result<()> {
    rotate_if_larger(&ConfigManager::log_file_path()?, MAX_LOG_SIZE)
}

fn rotate_if_larger(log_path: &Path, max_size: u64) -> Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = std::fs::metadata(log_path)?;
    if metadata.len() > max_size {
        let old_log_path = log_path.with_extension("log.old");
        if old_log_path.exists() {
            std::fs::remove_file(&old_log_path)?;
        }
        std::fs::rename(log_path, &old_log_path)?;
        log::info!("Log file rotated to {}", old_log_path.display());
    }

    Ok(())
}
