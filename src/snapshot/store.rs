use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::{version, FilesContent, Organisation, ProjectSnapshot};
use crate::error::{ContextError, Result};
use crate::exclusion::ExclusionRules;
use crate::paths::{
    files_content_json_in, organisation_json_in, version_from_organisation_name,
    EXCLUDE_FILE_NAME,
};

/// Persistence for snapshot documents in a project's store directory
///
/// Each version is two JSON documents, `organisation.<v>.json` and
/// `files_content.<v>.json`, which are always written and read together.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the store directory and seed the exclusion file with `rules`' defaults
    ///
    /// An existing exclusion file is left untouched.
    pub fn ensure_initialized(&self, rules: &ExclusionRules) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ContextError::io(&self.dir, e))?;

        let exclude_file = self.dir.join(EXCLUDE_FILE_NAME);
        if !exclude_file.exists() {
            fs::write(&exclude_file, rules.default_file_contents())
                .map_err(|e| ContextError::io(&exclude_file, e))?;
            log::info!("Created exclusion file: {}", exclude_file.display());
        }

        Ok(())
    }

    /// All version tokens present, in numeric order
    ///
    /// A store directory that does not exist yet has no versions.
    pub fn list_versions(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| ContextError::io(&self.dir, e))? {
            let entry = entry.map_err(|e| ContextError::io(&self.dir, e))?;
            let file_name = entry.file_name();
            if let Some(token) = file_name.to_str().and_then(version_from_organisation_name) {
                versions.push(token.to_string());
            }
        }

        version::sort(&mut versions);
        Ok(versions)
    }

    /// Identifier for the next snapshot: largest numeric version plus one
    pub fn next_version(&self) -> Result<String> {
        let versions = self.list_versions()?;
        Ok(version::next_after(versions.iter().map(String::as_str)))
    }

    /// Whether both documents of a version exist
    pub fn contains(&self, version: &str) -> bool {
        organisation_json_in(&self.dir, version).is_file()
            && files_content_json_in(&self.dir, version).is_file()
    }

    /// Write both documents of a snapshot, overwriting any previous ones
    pub fn save(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ContextError::io(&self.dir, e))?;

        let organisation_path = organisation_json_in(&self.dir, &snapshot.version);
        let files_path = files_content_json_in(&self.dir, &snapshot.version);

        write_json(&organisation_path, &snapshot.organisation)?;
        let size = write_json(&files_path, &snapshot.files_content)?;

        let size_mb = size as f64 / (1024.0 * 1024.0);
        log::info!(
            "Saved snapshot {} ({:.1} MB, {} files)",
            snapshot.version,
            size_mb,
            snapshot.files_content.len()
        );
        if size_mb > 100.0 {
            log::warn!("Large snapshot - consider adding exclusion rules");
        }

        Ok(())
    }

    /// Read both documents of a version
    ///
    /// # Errors
    /// `VersionNotFound` when either document is missing or unreadable,
    /// `MalformedSnapshotDocument` when one is not a mapping of the expected shape.
    pub fn load(&self, version: &str) -> Result<ProjectSnapshot> {
        let organisation: Organisation =
            read_document(&organisation_json_in(&self.dir, version), version)?;
        let files_content: FilesContent =
            read_document(&files_content_json_in(&self.dir, version), version)?;

        log::debug!(
            "Loaded snapshot {} ({} directories, {} files)",
            version,
            organisation.len(),
            files_content.len()
        );

        Ok(ProjectSnapshot::new(version, organisation, files_content))
    }

    /// Remove both documents of a version; absent documents are not an error
    pub fn delete(&self, version: &str) -> Result<()> {
        for path in [
            organisation_json_in(&self.dir, version),
            files_content_json_in(&self.dir, version),
        ] {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ContextError::io(&path, e)),
            }
        }
        Ok(())
    }
}

/// Serialize with a four-space indent; returns the number of bytes written
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<usize> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    fs::write(path, &buf).map_err(|e| ContextError::io(path, e))?;
    Ok(buf.len())
}

fn read_document<T: DeserializeOwned>(path: &Path, version: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        log::debug!("Cannot read {}: {}", path.display(), e);
        ContextError::VersionNotFound {
            version: version.to_string(),
            path: path.to_path_buf(),
        }
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ContextError::MalformedSnapshotDocument {
            path: path.to_path_buf(),
            reason: format!("invalid JSON: {e}"),
        })?;

    serde_json::from_value(value).map_err(|e| ContextError::MalformedSnapshotDocument {
        path: path.to_path_buf(),
        reason: format!("unexpected structure: {e}"),
    })
}
