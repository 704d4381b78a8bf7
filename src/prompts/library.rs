use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One named version of a template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVersion {
    pub version: String,
    #[serde(default)]
    pub before: String,
    #[serde(default)]
    pub after: String,
}

/// A reusable prompt with its versions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Free-form note about which files the prompt expects as context
    #[serde(default)]
    pub context_files: String,
    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LibraryFile {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    templates: Vec<PromptTemplate>,
}

/// JSON-backed collection of categories and prompt templates
///
/// Every mutation is written to disk immediately. Mutations naming an unknown
/// template or version, or adding an empty or duplicate name, change nothing
/// and return `Ok(false)`.
#[derive(Debug)]
pub struct PromptLibrary {
    path: PathBuf,
    data: LibraryFile,
}

impl PromptLibrary {
    /// Open the library in the configuration directory
    pub fn open_default() -> Result<Self> {
        Self::open(crate::config::ConfigManager::prompts_path()?)
    }

    /// Open a library file; a missing file is an empty library
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read prompt library: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse prompt library: {}", path.display()))?
        } else {
            LibraryFile::default()
        };

        Ok(PromptLibrary { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.data
            .serialize(&mut serializer)
            .context("Failed to serialize prompt library")?;

        fs::write(&self.path, buf)
            .with_context(|| format!("Failed to write prompt library: {}", self.path.display()))?;
        log::debug!("Saved prompt library to {}", self.path.display());
        Ok(())
    }

    // Categories

    pub fn categories(&self) -> &[String] {
        &self.data.categories
    }

    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.data.categories.iter().any(|c| c == name) {
            return Ok(false);
        }
        self.data.categories.push(name.to_string());
        self.save()?;
        Ok(true)
    }

    pub fn delete_category(&mut self, name: &str) -> Result<bool> {
        let before = self.data.categories.len();
        self.data.categories.retain(|c| c != name);
        if self.data.categories.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<bool> {
        let new = new.trim();
        if new.is_empty() {
            return Ok(false);
        }
        let Some(slot) = self.data.categories.iter_mut().find(|c| c.as_str() == old) else {
            return Ok(false);
        };
        *slot = new.to_string();
        self.save()?;
        Ok(true)
    }

    // Templates

    pub fn template_names(&self) -> Vec<&str> {
        self.data.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn template(&self, name: &str) -> Option<&PromptTemplate> {
        self.data.templates.iter().find(|t| t.name == name)
    }

    fn template_mut(&mut self, name: &str) -> Option<&mut PromptTemplate> {
        self.data.templates.iter_mut().find(|t| t.name == name)
    }

    pub fn add_template(&mut self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.template(name).is_some() {
            return Ok(false);
        }
        self.data.templates.push(PromptTemplate {
            name: name.to_string(),
            ..PromptTemplate::default()
        });
        self.save()?;
        Ok(true)
    }

    pub fn delete_template(&mut self, name: &str) -> Result<bool> {
        let before = self.data.templates.len();
        self.data.templates.retain(|t| t.name != name);
        if self.data.templates.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Update a template's fields; an empty `new_name` keeps the old one
    pub fn update_template(
        &mut self,
        old_name: &str,
        new_name: &str,
        category: &str,
        description: &str,
        context_files: &str,
    ) -> Result<bool> {
        let Some(template) = self.template_mut(old_name) else {
            return Ok(false);
        };
        if !new_name.trim().is_empty() {
            template.name = new_name.trim().to_string();
        }
        template.category = category.to_string();
        template.description = description.to_string();
        template.context_files = context_files.to_string();
        self.save()?;
        Ok(true)
    }

    // Versions

    pub fn versions(&self, name: &str) -> Vec<&str> {
        self.template(name)
            .map(|t| t.versions.iter().map(|v| v.version.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn version(&self, name: &str, version: &str) -> Option<&TemplateVersion> {
        self.template(name)?
            .versions
            .iter()
            .find(|v| v.version == version)
    }

    pub fn add_version(&mut self, name: &str, version: &str) -> Result<bool> {
        let version = version.trim();
        if version.is_empty() {
            return Ok(false);
        }
        let Some(template) = self.template_mut(name) else {
            return Ok(false);
        };
        if template.versions.iter().any(|v| v.version == version) {
            return Ok(false);
        }
        template.versions.push(TemplateVersion {
            version: version.to_string(),
            ..TemplateVersion::default()
        });
        self.save()?;
        Ok(true)
    }

    pub fn delete_version(&mut self, name: &str, version: &str) -> Result<bool> {
        let Some(template) = self.template_mut(name) else {
            return Ok(false);
        };
        let before = template.versions.len();
        template.versions.retain(|v| v.version != version);
        if template.versions.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Update a version's texts; an empty `new_version` keeps the old identifier
    pub fn update_version(
        &mut self,
        name: &str,
        old_version: &str,
        new_version: &str,
        before: &str,
        after: &str,
    ) -> Result<bool> {
        let Some(entry) = self
            .template_mut(name)
            .and_then(|t| t.versions.iter_mut().find(|v| v.version == old_version))
        else {
            return Ok(false);
        };
        if !new_version.trim().is_empty() {
            entry.version = new_version.trim().to_string();
        }
        entry.before = before.to_string();
        entry.after = after.to_string();
        self.save()?;
        Ok(true)
    }
}
