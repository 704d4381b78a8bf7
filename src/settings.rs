use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project folder holding snapshots, exclusions and exports
pub const DEFAULT_STORE_DIR_NAME: &str = "code_source";

/// User settings stored in `config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Folder created inside each project to hold its snapshots
    #[serde(default = "default_store_dir_name")]
    pub store_dir_name: String,

    /// Names excluded from every scan in addition to the built-in set
    #[serde(default)]
    pub extra_excludes: Vec<String>,
}

fn default_store_dir_name() -> String {
    DEFAULT_STORE_DIR_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store_dir_name: default_store_dir_name(),
            extra_excludes: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Load settings from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let mut settings: Settings =
            toml::from_str(&content).context("Failed to parse settings file")?;
        settings.store_dir_name = validate_store_dir_name(&settings.store_dir_name)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        crate::config::ConfigManager::settings_path()
    }
}

/// Check that a store folder name stays inside the project root
///
/// Returns the trimmed name. Empty names, `.`, `..` and names containing a
/// path separator are rejected.
pub fn validate_store_dir_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        anyhow::bail!("Store directory must be a single folder name, got '{name}'");
    }
    Ok(name.to_string())
}

/// Update the stored settings
pub fn update_settings(store_dir: Option<String>, extra_excludes: Option<String>) -> Result<()> {
    let mut settings = Settings::load()?;

    if let Some(name) = store_dir {
        let name = validate_store_dir_name(&name)?;
        println!("{}", format!("Set store directory to '{name}'").green());
        settings.store_dir_name = name;
    }

    if let Some(excludes) = extra_excludes {
        settings.extra_excludes = excludes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        println!(
            "{}",
            format!("Set extra excludes: {:?}", settings.extra_excludes).green()
        );
    }

    settings.save()?;
    println!("{}", "Settings saved successfully!".green().bold());

    Ok(())
}

/// Show the current settings
pub fn show_settings() -> Result<()> {
    let settings = Settings::load()?;

    println!("{}", "Current Settings:".bold());
    println!("  {}: {}", "Store directory".cyan(), settings.store_dir_name);
    println!(
        "  {}: {}",
        "Extra excludes".cyan(),
        if settings.extra_excludes.is_empty() {
            "None".to_string()
        } else {
            settings.extra_excludes.join(", ")
        }
    );

    Ok(())
}
