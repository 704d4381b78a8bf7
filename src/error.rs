//! Error types for the snapshot engine

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by scanning, persisting, loading and restoring snapshots
#[derive(Error, Debug)]
pub enum ContextError {
    // Selection errors
    #[error("No project selected")]
    ProjectNotSelected,

    #[error("No version selected")]
    NoVersionSelected,

    // Snapshot documents
    #[error("Version {version} not found: {}", .path.display())]
    VersionNotFound { version: String, path: PathBuf },

    #[error("Malformed snapshot document {}: {reason}", .path.display())]
    MalformedSnapshotDocument { path: PathBuf, reason: String },

    // Scanning
    #[error("Project root does not exist or is not a directory: {}", .0.display())]
    ProjectRootMissing(PathBuf),

    /// Recorded as placeholder content; never aborts a scan
    #[error("File is not valid UTF-8 text: {}", .path.display())]
    FileDecodeFailure { path: PathBuf },

    // Restoring
    #[error("Failed to write {}: {source}", .path.display())]
    FileWriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Path escapes the project root: {0}")]
    PathEscapesRoot(String),

    // Generic I/O and serialization
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContextError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ContextError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for the snapshot engine
pub type Result<T> = std::result::Result<T, ContextError>;
