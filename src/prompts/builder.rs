use clap::ValueEnum;

use super::TemplateVersion;

/// Context line used when the exported documents are attached separately
pub const ATTACHED_CONTEXT_NOTE: &str =
    "Interface: the context files are available in the @selected_context tab.";

/// How the selected context is referenced in a built prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptTarget {
    /// List each selected file as an `@path` mention
    Inline,
    /// Point at the exported `selected_context` documents
    Attached,
}

/// Assemble a prompt: `before`, the context block, then `after`
///
/// Each part is trimmed and empty parts are dropped; parts are separated by a
/// blank line.
pub fn build_prompt<S: AsRef<str>>(
    target: PromptTarget,
    version: &TemplateVersion,
    selected_files: &[S],
) -> String {
    let context_block = match target {
        PromptTarget::Inline if selected_files.is_empty() => {
            "Context files: (no files selected)".to_string()
        }
        PromptTarget::Inline => {
            let mentions: Vec<String> = selected_files
                .iter()
                .map(|path| format!("@{}", path.as_ref()))
                .collect();
            format!("Context files:\n{}", mentions.join("\n"))
        }
        PromptTarget::Attached => ATTACHED_CONTEXT_NOTE.to_string(),
    };

    [version.before.trim(), context_block.as_str(), version.after.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(before: &str, after: &str) -> TemplateVersion {
        TemplateVersion {
            version: "1".to_string(),
            before: before.to_string(),
            after: after.to_string(),
        }
    }

    #[test]
    fn test_inline_lists_files() {
        let text = build_prompt(
            PromptTarget::Inline,
            &version("  Review this code.\n", "Answer briefly."),
            &["src/app.py", "README.md"],
        );
        assert_eq!(
            text,
            "Review this code.\n\nContext files:\n@src/app.py\n@README.md\n\nAnswer briefly."
        );
    }

    #[test]
    fn test_inline_without_files() {
        let text = build_prompt::<&str>(PromptTarget::Inline, &version("Fix it", ""), &[]);
        assert_eq!(text, "Fix it\n\nContext files: (no files selected)");
    }

    #[test]
    fn test_attached_ignores_files() {
        let text = build_prompt(PromptTarget::Attached, &version("", "  "), &["a.py"]);
        assert_eq!(text, ATTACHED_CONTEXT_NOTE);
    }
}
