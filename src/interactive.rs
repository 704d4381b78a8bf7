use anyhow::{Context, Result};
use inquire::Confirm;

/// Check if we're running in an interactive terminal
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout)
}

/// Ask before a destructive action
///
/// Returns `true` without prompting when `assume_yes` is set or when no
/// terminal is attached.
pub fn confirm(message: &str, help: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes || !is_interactive() {
        return Ok(true);
    }

    Confirm::new(message)
        .with_default(false)
        .with_help_message(help)
        .prompt()
        .context("Failed to get confirmation")
}
