//! Versioned project snapshots.
//!
//! A snapshot captures the directory organisation and the full text of every
//! non-excluded file of a project. Snapshots are produced by [`scan`], persisted
//! by [`SnapshotStore`], narrowed by [`filter`] and written back to disk by
//! [`restore_all`] / [`restore_selected`].

mod cleanup;
mod filter;
mod restore;
mod scan;
mod store;
pub mod version;

pub use cleanup::prune;
pub use filter::filter;
pub use restore::{restore_all, restore_selected};
pub use scan::{read_text, scan, UNREADABLE_PLACEHOLDER};
pub use store::SnapshotStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immediate children of one scanned directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// Subdirectory names, excluded ones removed
    #[serde(default)]
    pub dirs: Vec<String>,
    /// File names, excluded ones removed
    #[serde(default)]
    pub files: Vec<String>,
}

/// Relative directory path (`""` for the root) to its listing
pub type Organisation = BTreeMap<String, DirectoryListing>;

/// Relative file path to its text content
pub type FilesContent = BTreeMap<String, String>;

/// A point-in-time capture of a project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSnapshot {
    /// Zero-padded version identifier, e.g. `"001"`
    pub version: String,
    pub organisation: Organisation,
    pub files_content: FilesContent,
}

impl ProjectSnapshot {
    pub fn new(
        version: impl Into<String>,
        organisation: Organisation,
        files_content: FilesContent,
    ) -> Self {
        ProjectSnapshot {
            version: version.into(),
            organisation,
            files_content,
        }
    }

    /// File paths in sorted order
    pub fn file_paths(&self) -> Vec<String> {
        self.files_content.keys().cloned().collect()
    }

    pub fn file_count(&self) -> usize {
        self.files_content.len()
    }
}

/// Join a directory key and a child name with `/`, treating `""` as the root
pub(crate) fn join_relative(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
