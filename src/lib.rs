//! # code-context
//!
//! A command-line tool that captures a project directory into versioned
//! snapshots, renders them as Markdown/HTML documents and restores files from
//! any version.
//!
//! ## Overview
//!
//! Each project gets a store folder (`code_source/` by default) holding an
//! exclusion file and, per version, two JSON documents: the directory
//! organisation and the full text of every file. Versions are numbered `001`,
//! `002`, ... A subset of files from any version can be exported on its own or
//! written back to the project.
//!
//! ## Architecture
//!
//! - Scanning, persistence, filtering and restore ([`snapshot`], [`exclusion`], [`paths`])
//! - Document rendering ([`render`])
//! - Explicit selection state ([`session`])
//! - Prompt templates ([`prompts`])
//! - Configuration, logging and command handlers ([`config`], [`settings`], [`logger`], [`handlers`])

/// Platform-agnostic configuration directory management.
///
/// Locates the session state, settings, prompt library and log file following
/// platform conventions (XDG on Linux, Application Support on macOS, AppData on
/// Windows).
pub mod config;

/// Error types of the snapshot engine.
pub mod error;

/// Name-based exclusion rules applied while scanning.
pub mod exclusion;

/// Command handlers used by the binary.
pub mod handlers;

/// Terminal detection and confirmation prompts.
pub mod interactive;

/// Logging configuration: console output via `env_logger` plus a rotated log file.
pub mod logger;

/// On-disk locations derived from a project root.
pub mod paths;

/// Prompt template library and prompt assembly.
pub mod prompts;

/// Markdown and HTML rendering of snapshots.
pub mod render;

/// Explicit project/version/file selection and the workflows built on it.
pub mod session;

/// User settings stored as TOML.
pub mod settings;

/// Snapshot scanning, persistence, filtering, restore and pruning.
pub mod snapshot;

pub use error::{ContextError, Result};
pub use session::{Project, Session, SessionState};
pub use snapshot::{ProjectSnapshot, SnapshotStore};
