//! Name-based exclusion rules for project scans.
//!
//! A rule matches a single path segment (file or directory basename) when the
//! segment equals the rule or starts with it, so `venv` also hides `venv2`.
//! The built-in defaults never change after construction; the custom set is
//! reloaded from the project's `exclude.txt` and replaced wholesale each time.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::{ContextError, Result};
use crate::settings::{Settings, DEFAULT_STORE_DIR_NAME};

/// Names always excluded from a scan
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "venv",
    DEFAULT_STORE_DIR_NAME,
    "archive",
    ".env",
    ".venv",
    ".git",
    "__pycache__",
    ".python-version",
    "dist",
    "build",
    "main.spec",
];

/// Built-in and user-supplied exclusion rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRules {
    defaults: BTreeSet<String>,
    custom: BTreeSet<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::new()
    }
}

impl ExclusionRules {
    /// Rules holding only the built-in defaults
    pub fn new() -> Self {
        ExclusionRules {
            defaults: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            custom: BTreeSet::new(),
        }
    }

    /// Defaults extended with the store folder name and any configured extras
    pub fn from_settings(settings: &Settings) -> Self {
        let extra = std::iter::once(settings.store_dir_name.clone())
            .chain(settings.extra_excludes.iter().cloned());
        Self::new().with_defaults(extra)
    }

    /// Add names to the fixed default set
    pub fn with_defaults<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults.extend(
            names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.trim().is_empty()),
        );
        self
    }

    pub fn defaults(&self) -> &BTreeSet<String> {
        &self.defaults
    }

    pub fn custom(&self) -> &BTreeSet<String> {
        &self.custom
    }

    /// Union of default and custom rules
    pub fn all(&self) -> BTreeSet<&str> {
        self.defaults
            .iter()
            .chain(self.custom.iter())
            .map(String::as_str)
            .collect()
    }

    /// Whether a file or directory name should be skipped
    pub fn should_exclude(&self, name: &str) -> bool {
        self.defaults
            .iter()
            .chain(self.custom.iter())
            .any(|rule| name.starts_with(rule.as_str()))
    }

    /// Replace the custom rules with the trimmed, non-empty lines of `source`
    pub fn load(&mut self, source: &str) {
        self.custom.clear();
        self.custom.extend(
            source
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    /// Replace the custom rules from a file; a missing file leaves them empty
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        match fs::read_to_string(path) {
            Ok(content) => {
                self.load(&content);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.custom.clear();
                Ok(())
            }
            Err(e) => {
                self.custom.clear();
                Err(ContextError::io(path, e))
            }
        }
    }

    /// Contents used to seed a new exclusion file: sorted defaults, one per line
    pub fn default_file_contents(&self) -> String {
        self.defaults
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
