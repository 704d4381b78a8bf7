//! Markdown and HTML documents presenting a snapshot.
//!
//! Both renders list the directory organisation first (subdirectories, then
//! files, per directory) and then every file's full content. They are pure and
//! accept any snapshot, including an empty one.

use crate::snapshot::ProjectSnapshot;

const FENCE: &str = "```";
/// Stand-in for a literal fence inside file content
const NEUTRALIZED_FENCE: &str = "`` `";

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() {
        "."
    } else {
        dir
    }
}

/// Render a snapshot as Markdown
pub fn to_markdown(snapshot: &ProjectSnapshot) -> String {
    let mut output = String::new();

    output.push_str("# Project organisation\n\n");

    for (dir, listing) in &snapshot.organisation {
        output.push_str(&format!("## {}\n", display_dir(dir)));
        output.push_str("**Directories:**\n");
        for name in &listing.dirs {
            output.push_str(&format!("- {name}\n"));
        }
        output.push_str("\n**Files:**\n");
        for name in &listing.files {
            output.push_str(&format!("- {name}\n"));
        }
        output.push_str("\n---\n");
    }

    output.push_str("\n# File contents\n\n");

    for (path, content) in &snapshot.files_content {
        output.push_str(&format!("## {path}\n\n"));
        output.push_str(FENCE);
        output.push_str("code\n");
        output.push_str(&content.replace(FENCE, NEUTRALIZED_FENCE));
        output.push('\n');
        output.push_str(FENCE);
        output.push_str("\n\n");
    }

    output
}

/// Render a snapshot as a self-contained HTML document
///
/// File content and names are escaped so they always display as literal text.
pub fn to_html(snapshot: &ProjectSnapshot) -> String {
    let mut parts: Vec<String> = vec![
        "<!DOCTYPE html>".to_string(),
        "<html>".to_string(),
        "<head><meta charset='utf-8'><title>Context</title></head>".to_string(),
        "<body>".to_string(),
        "<h1>Project organisation</h1>".to_string(),
    ];

    for (dir, listing) in &snapshot.organisation {
        parts.push(format!("<h2>{}</h2>", escape_html(display_dir(dir))));
        parts.push("<h3>Directories:</h3><ul>".to_string());
        for name in &listing.dirs {
            parts.push(format!("<li>{}</li>", escape_html(name)));
        }
        parts.push("</ul>".to_string());
        parts.push("<h3>Files:</h3><ul>".to_string());
        for name in &listing.files {
            parts.push(format!("<li>{}</li>", escape_html(name)));
        }
        parts.push("</ul><hr>".to_string());
    }

    parts.push("<h1>File contents</h1>".to_string());
    for (path, content) in &snapshot.files_content {
        parts.push(format!("<h2>{}</h2>", escape_html(path)));
        parts.push("<pre>".to_string());
        parts.push(escape_html(content));
        parts.push("</pre>".to_string());
    }

    parts.push("</body></html>".to_string());
    parts.join("\n")
}

/// Escape `&`, `<` and `>`
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{DirectoryListing, FilesContent, Organisation};

    fn sample() -> ProjectSnapshot {
        let mut organisation = Organisation::new();
        organisation.insert(
            String::new(),
            DirectoryListing {
                dirs: vec!["src".to_string()],
                files: vec!["README.md".to_string()],
            },
        );
        organisation.insert(
            "src".to_string(),
            DirectoryListing {
                dirs: vec![],
                files: vec!["main.rs".to_string()],
            },
        );
        let mut files = FilesContent::new();
        files.insert(
            "README.md".to_string(),
            "Usage:\n```sh\nrun\n```\n".to_string(),
        );
        files.insert(
            "src/main.rs".to_string(),
            "fn main() { if a < b && c > d {} }".to_string(),
        );
        ProjectSnapshot::new("001", organisation, files)
    }

    #[test]
    fn test_markdown_structure() {
        let md = to_markdown(&sample());

        assert!(md.starts_with("# Project organisation\n\n## .\n"));
        assert!(md.contains("**Directories:**\n- src\n"));
        assert!(md.contains("**Files:**\n- README.md\n"));
        assert!(md.contains("## src\n"));
        assert!(md.contains("# File contents"));
        assert!(md.contains("## src/main.rs\n\n```code\nfn main()"));

        let org_pos = md.find("# Project organisation").unwrap();
        let contents_pos = md.find("# File contents").unwrap();
        assert!(org_pos < contents_pos);
    }

    #[test]
    fn test_markdown_neutralizes_fences() {
        let md = to_markdown(&sample());
        let readme_block = md
            .split("## README.md\n\n```code\n")
            .nth(1)
            .unwrap()
            .split("\n```\n")
            .next()
            .unwrap();

        assert!(!readme_block.contains("```"));
        assert!(readme_block.contains("`` `sh"));
    }

    #[test]
    fn test_html_escapes_content() {
        let html = to_html(&sample());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</body></html>"));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d"));
        assert!(!html.contains("a < b"));
        assert!(html.contains("<h2>src/main.rs</h2>\n<pre>\n"));
        assert!(html.contains("<li>README.md</li>"));
    }

    #[test]
    fn test_html_escapes_names() {
        let mut files = FilesContent::new();
        files.insert("<b>.txt".to_string(), String::new());
        let snapshot = ProjectSnapshot::new("001", Organisation::new(), files);

        let html = to_html(&snapshot);
        assert!(html.contains("<h2>&lt;b&gt;.txt</h2>"));
    }

    #[test]
    fn test_empty_snapshot_renders() {
        let empty = ProjectSnapshot::new("001", Organisation::new(), FilesContent::new());

        let md = to_markdown(&empty);
        assert_eq!(md, "# Project organisation\n\n\n# File contents\n\n");

        let html = to_html(&empty);
        assert!(html.contains("<h1>File contents</h1>"));
    }

    #[test]
    fn test_escape_html_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("<&>"), "&lt;&amp;&gt;");
    }
}
