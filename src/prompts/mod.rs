//! Reusable prompt templates.
//!
//! A template carries named versions, each a pair of "before" and "after"
//! texts. [`build_prompt`] wraps a context block between the two so the result
//! can be pasted into an external assistant together with the exported context.

mod builder;
mod library;

pub use builder::{build_prompt, PromptTarget, ATTACHED_CONTEXT_NOTE};
pub use library::{PromptLibrary, PromptTemplate, TemplateVersion};
