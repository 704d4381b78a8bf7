use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{join_relative, DirectoryListing, FilesContent, Organisation, ProjectSnapshot, SnapshotStore};
use crate::error::{ContextError, Result};
use crate::exclusion::ExclusionRules;
use crate::paths::ProjectPaths;

/// Content stored for files that cannot be read or are not valid UTF-8
pub const UNREADABLE_PLACEHOLDER: &str = "<< unable to read this file >>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildKind {
    Dir,
    /// Listed with the directories but never descended into
    LinkedDir,
    File,
}

struct Child {
    name: String,
    path: PathBuf,
    kind: ChildKind,
}

/// Read a file as strict UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| ContextError::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| ContextError::FileDecodeFailure {
        path: path.to_path_buf(),
    })
}

/// Scan a project tree into a new snapshot
///
/// The traversal is top-down. Before each directory is listed the exclusion
/// file is read again, so edits to it apply without restarting. Excluded
/// directories are never entered and appear nowhere in the result. Files that
/// fail to read or decode are recorded with [`UNREADABLE_PLACEHOLDER`].
///
/// # Errors
/// Fails only when the project root is missing or not a directory, or when the
/// store directory exists but cannot be listed to compute the next version.
pub fn scan(paths: &ProjectPaths, rules: &mut ExclusionRules) -> Result<ProjectSnapshot> {
    let root = paths.root();
    if !root.is_dir() {
        return Err(ContextError::ProjectRootMissing(root.to_path_buf()));
    }

    let exclude_file = paths.exclude_file();
    let mut organisation = Organisation::new();
    let mut files_content = FilesContent::new();
    let mut unreadable = 0usize;

    let mut pending: Vec<(PathBuf, String)> = vec![(root.to_path_buf(), String::new())];

    while let Some((dir, rel_dir)) = pending.pop() {
        if let Err(e) = rules.load_file(&exclude_file) {
            log::warn!("Using default exclusions only: {e}");
        }

        let children = match list_children(&dir) {
            Ok(children) => children,
            Err(e) => {
                log::warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };

        let mut listing = DirectoryListing::default();
        let mut descend = Vec::new();

        for child in children {
            if rules.should_exclude(&child.name) {
                log::trace!("Excluded {}", child.path.display());
                continue;
            }
            match child.kind {
                ChildKind::Dir => {
                    descend.push((child.path, join_relative(&rel_dir, &child.name)));
                    listing.dirs.push(child.name);
                }
                ChildKind::LinkedDir => listing.dirs.push(child.name),
                ChildKind::File => {
                    let content = match read_text(&child.path) {
                        Ok(text) => text,
                        Err(e) => {
                            log::debug!("Storing placeholder: {e}");
                            unreadable += 1;
                            UNREADABLE_PLACEHOLDER.to_string()
                        }
                    };
                    files_content.insert(join_relative(&rel_dir, &child.name), content);
                    listing.files.push(child.name);
                }
            }
        }

        organisation.insert(rel_dir, listing);

        // Reverse so the first subdirectory is visited next
        pending.extend(descend.into_iter().rev());
    }

    let version = SnapshotStore::new(paths.store_dir()).next_version()?;

    log::info!(
        "Scanned {}: {} directories, {} files ({} unreadable), next version {}",
        root.display(),
        organisation.len(),
        files_content.len(),
        unreadable,
        version
    );

    Ok(ProjectSnapshot::new(version, organisation, files_content))
}

/// Immediate children of a directory, sorted by name
fn list_children(dir: &Path) -> walkdir::Result<Vec<Child>> {
    let mut children = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 name: {}", entry.path().display());
            continue;
        };

        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            ChildKind::Dir
        } else if file_type.is_symlink() && entry.path().is_dir() {
            ChildKind::LinkedDir
        } else {
            ChildKind::File
        };

        children.push(Child {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
            kind,
        });
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_excludes_venv() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.py", b"print(1)");
        write(temp.path(), "venv/b.py", b"print(2)");

        let paths = ProjectPaths::new(temp.path());
        let snapshot = scan(&paths, &mut ExclusionRules::new()).unwrap();

        assert_eq!(snapshot.version, "001");
        assert_eq!(snapshot.organisation.len(), 1);
        let root = &snapshot.organisation[""];
        assert!(root.dirs.is_empty());
        assert_eq!(root.files, vec!["a.py".to_string()]);
        assert_eq!(snapshot.files_content.len(), 1);
        assert_eq!(snapshot.files_content["a.py"], "print(1)");
    }

    #[test]
    fn test_scan_nested_directories() {
        let temp = tempdir().unwrap();
        write(temp.path(), "src/app.py", b"app");
        write(temp.path(), "src/ui/view.py", b"view");
        write(temp.path(), "README.md", b"readme");

        let paths = ProjectPaths::new(temp.path());
        let snapshot = scan(&paths, &mut ExclusionRules::new()).unwrap();

        assert_eq!(snapshot.organisation[""].dirs, vec!["src".to_string()]);
        assert_eq!(snapshot.organisation["src"].dirs, vec!["ui".to_string()]);
        assert_eq!(snapshot.organisation["src"].files, vec!["app.py".to_string()]);
        assert_eq!(snapshot.organisation["src/ui"].files, vec!["view.py".to_string()]);
        assert_eq!(snapshot.files_content["src/ui/view.py"], "view");
        assert_eq!(snapshot.files_content["README.md"], "readme");
    }

    #[test]
    fn test_scan_skips_own_store() {
        let temp = tempdir().unwrap();
        write(temp.path(), "main.rs", b"fn main() {}");
        write(temp.path(), "code_source/organisation.001.json", b"{}");

        let paths = ProjectPaths::new(temp.path());
        let snapshot = scan(&paths, &mut ExclusionRules::new()).unwrap();

        assert!(snapshot.organisation[""].dirs.is_empty());
        assert_eq!(snapshot.file_paths(), vec!["main.rs"]);
        // An existing organisation document bumps the version
        assert_eq!(snapshot.version, "002");
    }

    #[test]
    fn test_scan_invalid_utf8_uses_placeholder() {
        let temp = tempdir().unwrap();
        write(temp.path(), "blob.dat", &[0xFF, 0xFE, 0x00, 0x01]);
        write(temp.path(), "ok.txt", "héllo".as_bytes());

        let paths = ProjectPaths::new(temp.path());
        let snapshot = scan(&paths, &mut ExclusionRules::new()).unwrap();

        assert_eq!(snapshot.files_content["blob.dat"], UNREADABLE_PLACEHOLDER);
        assert_eq!(snapshot.files_content["ok.txt"], "héllo");
        assert!(snapshot.organisation[""].files.contains(&"blob.dat".to_string()));
    }

    #[test]
    fn test_scan_reads_exclusion_file() {
        let temp = tempdir().unwrap();
        write(temp.path(), "keep.py", b"keep");
        write(temp.path(), "node_modules/pkg/index.js", b"js");
        write(temp.path(), "secret.key", b"key");
        write(temp.path(), "code_source/exclude.txt", b"node_modules\nsecret\n");

        let paths = ProjectPaths::new(temp.path());
        let mut rules = ExclusionRules::new();
        let snapshot = scan(&paths, &mut rules).unwrap();

        assert_eq!(snapshot.file_paths(), vec!["keep.py"]);
        assert!(!snapshot.organisation.contains_key("node_modules"));
        assert!(rules.custom().contains("secret"));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp = tempdir().unwrap();
        let paths = ProjectPaths::new(temp.path().join("missing"));
        let err = scan(&paths, &mut ExclusionRules::new()).unwrap_err();
        assert!(matches!(err, ContextError::ProjectRootMissing(_)));
    }

    #[test]
    fn test_scan_root_is_file_fails() {
        let temp = tempdir().unwrap();
        write(temp.path(), "file.txt", b"x");
        let paths = ProjectPaths::new(temp.path().join("file.txt"));
        let err = scan(&paths, &mut ExclusionRules::new()).unwrap_err();
        assert!(matches!(err, ContextError::ProjectRootMissing(_)));
    }

    #[test]
    fn test_every_file_listed_in_parent() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a/b/c.txt", b"c");
        write(temp.path(), "a/d.txt", b"d");
        write(temp.path(), "e.txt", b"e");

        let paths = ProjectPaths::new(temp.path());
        let snapshot = scan(&paths, &mut ExclusionRules::new()).unwrap();

        for path in snapshot.files_content.keys() {
            let (dir, name) = match path.rsplit_once('/') {
                Some((dir, name)) => (dir, name),
                None => ("", path.as_str()),
            };
            assert!(snapshot.organisation[dir].files.iter().any(|f| f == name));
        }
    }

    #[test]
    fn test_read_text_errors() {
        let temp = tempdir().unwrap();
        write(temp.path(), "bad.bin", &[0xC3, 0x28]);

        let err = read_text(&temp.path().join("bad.bin")).unwrap_err();
        assert!(matches!(err, ContextError::FileDecodeFailure { .. }));

        let err = read_text(&temp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ContextError::Io { .. }));
    }
}
