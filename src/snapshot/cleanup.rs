use super::SnapshotStore;
use crate::error::Result;

/// Delete every version except the newest `keep`
///
/// Versions are ranked in numeric order, non-numeric tokens counting as the
/// newest. With `dry_run` nothing is removed.
///
/// # Returns
/// The versions deleted (or that would be deleted), oldest first
pub fn prune(store: &SnapshotStore, keep: usize, dry_run: bool) -> Result<Vec<String>> {
    let versions = store.list_versions()?;
    let cutoff = versions.len().saturating_sub(keep);
    let to_delete: Vec<String> = versions.into_iter().take(cutoff).collect();

    if dry_run {
        log::info!("Would prune {} versions", to_delete.len());
        return Ok(to_delete);
    }

    for version in &to_delete {
        if let Err(e) = store.delete(version) {
            log::warn!("Failed to delete version {}: {}", version, e);
        }
    }
    log::info!("Pruned {} versions", to_delete.len());

    Ok(to_delete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{FilesContent, Organisation, ProjectSnapshot};
    use tempfile::tempdir;

    fn store_with(versions: &[&str]) -> (tempfile::TempDir, SnapshotStore) {
        let temp = tempdir().unwrap();
        let store = SnapshotStore::new(temp.path());
        for v in versions {
            store
                .save(&ProjectSnapshot::new(*v, Organisation::new(), FilesContent::new()))
                .unwrap();
        }
        (temp, store)
    }

    #[test]
    fn test_prune_keeps_newest() {
        let (_temp, store) = store_with(&["001", "002", "010", "003"]);

        let deleted = prune(&store, 2, false).unwrap();

        assert_eq!(deleted, vec!["001", "002"]);
        assert_eq!(store.list_versions().unwrap(), vec!["003", "010"]);
    }

    #[test]
    fn test_prune_dry_run() {
        let (_temp, store) = store_with(&["001", "002", "003"]);

        let deleted = prune(&store, 1, true).unwrap();

        assert_eq!(deleted, vec!["001", "002"]);
        assert_eq!(store.list_versions().unwrap().len(), 3);
    }

    #[test]
    fn test_prune_keep_more_than_present() {
        let (_temp, store) = store_with(&["001"]);
        assert!(prune(&store, 5, false).unwrap().is_empty());
        assert_eq!(store.list_versions().unwrap(), vec!["001"]);
    }
}
