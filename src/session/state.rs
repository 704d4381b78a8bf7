use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::Session;
use crate::settings::Settings;

/// Selection remembered between command invocations
///
/// Stored as JSON in the configuration directory. Only the command-line layer
/// reads or writes it; library workflows always receive an explicit [`Session`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Root of the selected project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,

    /// Selected snapshot version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_version: Option<String>,

    /// Files picked for selective export and restore
    #[serde(default)]
    pub selected_files: Vec<String>,
}

impl SessionState {
    /// Load the state from the configuration directory; missing means empty
    pub fn load() -> Result<Self> {
        Self::load_from(&crate::config::ConfigManager::state_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session state: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session state: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&crate::config::ConfigManager::state_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize session state")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write session state: {}", path.display()))?;

        Ok(())
    }

    /// Rebuild a session, with `project_override` replacing the remembered project
    ///
    /// Switching to a different project drops the remembered version and files.
    pub fn into_session(
        self,
        project_override: Option<&Path>,
        settings: &Settings,
    ) -> Result<Session> {
        let mut session = Session::new();

        let root = match project_override {
            Some(path) => Some(
                path.canonicalize()
                    .with_context(|| format!("Project not found: {}", path.display()))?,
            ),
            None => self.project_root.clone(),
        };

        let Some(root) = root else {
            return Ok(session);
        };

        let same_project = self.project_root.as_deref() == Some(root.as_path());
        session
            .select_project(&root, settings)
            .with_context(|| format!("Failed to open project: {}", root.display()))?;

        if same_project {
            if let Some(version) = self.selected_version {
                session.select_version(version);
            }
            session.set_selected_files(self.selected_files);
        }

        Ok(session)
    }

    /// Capture the selection of a session
    pub fn from_session(session: &Session) -> Self {
        SessionState {
            project_root: session.project().ok().map(|p| p.root().to_path_buf()),
            selected_version: session.selected_version().ok().map(str::to_string),
            selected_files: session.selected_files().to_vec(),
        }
    }
}
