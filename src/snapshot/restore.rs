use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::ProjectSnapshot;
use crate::error::{ContextError, Result};

/// Write every file of a snapshot back under `root`
///
/// Missing parent directories are created and existing files overwritten.
/// Stops at the first failed write.
pub fn restore_all(root: &Path, snapshot: &ProjectSnapshot) -> Result<usize> {
    let mut written = 0;
    for (rel_path, content) in &snapshot.files_content {
        write_file(root, rel_path, content)?;
        written += 1;
    }
    log::info!(
        "Restored {} files from version {} into {}",
        written,
        snapshot.version,
        root.display()
    );
    Ok(written)
}

/// Write only the selected files of a snapshot back under `root`
///
/// Selected paths the snapshot does not contain are ignored; files outside
/// the selection are left untouched.
pub fn restore_selected<S: AsRef<str>>(
    root: &Path,
    snapshot: &ProjectSnapshot,
    selected: &[S],
) -> Result<usize> {
    let selected: HashSet<&str> = selected.iter().map(AsRef::<str>::as_ref).collect();

    let mut written = 0;
    for (rel_path, content) in &snapshot.files_content {
        if !selected.contains(rel_path.as_str()) {
            continue;
        }
        write_file(root, rel_path, content)?;
        written += 1;
    }
    log::info!(
        "Restored {} of {} selected files from version {}",
        written,
        selected.len(),
        snapshot.version
    );
    Ok(written)
}

fn write_file(root: &Path, rel_path: &str, content: &str) -> Result<()> {
    let target = resolve(root, rel_path)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|source| ContextError::FileWriteFailure {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target, content).map_err(|source| ContextError::FileWriteFailure {
        path: target.clone(),
        source,
    })?;

    log::debug!("Restored {}", target.display());
    Ok(())
}

/// Join a `/`-separated relative path onto `root`, refusing anything that leaves it
fn resolve(root: &Path, rel_path: &str) -> Result<PathBuf> {
    let relative = Path::new(rel_path);
    let mut target = root.to_path_buf();
    let mut has_name = false;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                target.push(part);
                has_name = true;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ContextError::PathEscapesRoot(rel_path.to_string()));
            }
        }
    }

    if !has_name {
        return Err(ContextError::PathEscapesRoot(rel_path.to_string()));
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FilesContent, Organisation};
    use tempfile::tempdir;

    fn snapshot_of(files: &[(&str, &str)]) -> ProjectSnapshot {
        let files: FilesContent = files
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProjectSnapshot::new("001", Organisation::new(), files)
    }

    #[test]
    fn test_restore_all_creates_directories() {
        let temp = tempdir().unwrap();
        let snapshot = snapshot_of(&[("a.py", "print(1)"), ("src/deep/b.py", "b\n")]);

        let written = restore_all(temp.path(), &snapshot).unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(temp.path().join("a.py")).unwrap(), "print(1)");
        assert_eq!(
            fs::read_to_string(temp.path().join("src/deep/b.py")).unwrap(),
            "b\n"
        );
    }

    #[test]
    fn test_restore_all_overwrites() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "modified").unwrap();

        restore_all(temp.path(), &snapshot_of(&[("a.py", "original")])).unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("a.py")).unwrap(), "original");
    }

    #[test]
    fn test_restore_selected_leaves_others() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "local a").unwrap();
        fs::write(temp.path().join("b.py"), "local b").unwrap();
        let snapshot = snapshot_of(&[("a.py", "snap a"), ("b.py", "snap b")]);

        let written = restore_selected(temp.path(), &snapshot, &["b.py", "ghost.py"]).unwrap();

        assert_eq!(written, 1);
        assert_eq!(fs::read_to_string(temp.path().join("a.py")).unwrap(), "local a");
        assert_eq!(fs::read_to_string(temp.path().join("b.py")).unwrap(), "snap b");
        assert!(!temp.path().join("ghost.py").exists());
    }

    #[test]
    fn test_restore_rejects_traversal() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();

        let err = restore_all(&project, &snapshot_of(&[("../evil.txt", "x")])).unwrap_err();
        assert!(matches!(err, ContextError::PathEscapesRoot(_)));
        assert!(!temp.path().join("evil.txt").exists());

        let err = restore_all(&project, &snapshot_of(&[("/etc/evil", "x")])).unwrap_err();
        assert!(matches!(err, ContextError::PathEscapesRoot(_)));
    }

    #[test]
    fn test_restore_write_failure() {
        let temp = tempdir().unwrap();
        // A file where a directory is needed
        fs::write(temp.path().join("src"), "not a dir").unwrap();

        let err = restore_all(temp.path(), &snapshot_of(&[("src/a.py", "x")])).unwrap_err();
        assert!(matches!(err, ContextError::FileWriteFailure { .. }));
    }
}
