use std::path::{Path, PathBuf};

use crate::settings::DEFAULT_STORE_DIR_NAME;

/// On-disk locations derived from a project root
///
/// Every path lives in the store folder inside the project, so a project carries
/// its own snapshots, exclusion file and rendered documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
    store_dir: PathBuf,
}

impl ProjectPaths {
    /// Paths for a project using the default store folder name
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_store_name(root, DEFAULT_STORE_DIR_NAME)
    }

    /// Paths for a project using a custom store folder name
    pub fn with_store_name(root: impl Into<PathBuf>, store_dir_name: &str) -> Self {
        let root = root.into();
        let store_dir = root.join(store_dir_name);
        ProjectPaths { root, store_dir }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn exclude_file(&self) -> PathBuf {
        self.store_dir.join(EXCLUDE_FILE_NAME)
    }

    pub fn organisation_json(&self, version: &str) -> PathBuf {
        organisation_json_in(&self.store_dir, version)
    }

    pub fn files_content_json(&self, version: &str) -> PathBuf {
        files_content_json_in(&self.store_dir, version)
    }

    pub fn context_md(&self) -> PathBuf {
        self.store_dir.join("context.md")
    }

    pub fn context_html(&self) -> PathBuf {
        self.store_dir.join("context.html")
    }

    pub fn selected_context_md(&self) -> PathBuf {
        self.store_dir.join("selected_context.md")
    }

    pub fn selected_context_html(&self) -> PathBuf {
        self.store_dir.join("selected_context.html")
    }
}

pub(crate) const EXCLUDE_FILE_NAME: &str = "exclude.txt";
pub(crate) const ORGANISATION_PREFIX: &str = "organisation.";
pub(crate) const FILES_CONTENT_PREFIX: &str = "files_content.";
pub(crate) const DOCUMENT_SUFFIX: &str = ".json";

pub(crate) fn organisation_json_in(store_dir: &Path, version: &str) -> PathBuf {
    store_dir.join(format!("{ORGANISATION_PREFIX}{version}{DOCUMENT_SUFFIX}"))
}

pub(crate) fn files_content_json_in(store_dir: &Path, version: &str) -> PathBuf {
    store_dir.join(format!("{FILES_CONTENT_PREFIX}{version}{DOCUMENT_SUFFIX}"))
}

/// Extract the version token from an organisation document file name
pub(crate) fn version_from_organisation_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(ORGANISATION_PREFIX)?
        .strip_suffix(DOCUMENT_SUFFIX)
        .filter(|token| !token.is_empty())
}
