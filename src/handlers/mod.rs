//! Command handler modules
//!
//! Each handler drives one command of the CLI against an explicit
//! [`Session`](crate::session::Session) and prints its outcome.

pub mod export;
pub mod project;
pub mod prompts;
pub mod restore;
pub mod versions;

pub use export::handle_export_selected;
pub use project::{handle_exclusions, handle_extract, handle_select_project, handle_status};
pub use prompts::handle_prompt;
pub use restore::handle_restore;
pub use versions::{
    handle_delete_version, handle_files, handle_list_versions, handle_pick_files, handle_prune,
    handle_select_version,
};
