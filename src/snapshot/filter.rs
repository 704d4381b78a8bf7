use std::collections::HashSet;

use super::{join_relative, DirectoryListing, FilesContent, Organisation, ProjectSnapshot};

/// Derive a snapshot holding only the selected files
///
/// Each directory keeps only its selected files and is dropped when none
/// remain. The `dirs` list of a kept directory is carried over as is. Paths
/// in `selected` that the snapshot does not contain are ignored.
pub fn filter<S: AsRef<str>>(snapshot: &ProjectSnapshot, selected: &[S]) -> ProjectSnapshot {
    let selected: HashSet<&str> = selected.iter().map(AsRef::<str>::as_ref).collect();

    let files_content: FilesContent = snapshot
        .files_content
        .iter()
        .filter(|(path, _)| selected.contains(path.as_str()))
        .map(|(path, content)| (path.clone(), content.clone()))
        .collect();

    let organisation: Organisation = snapshot
        .organisation
        .iter()
        .filter_map(|(dir, listing)| {
            let files: Vec<String> = listing
                .files
                .iter()
                .filter(|name| selected.contains(join_relative(dir, name).as_str()))
                .cloned()
                .collect();
            if files.is_empty() {
                None
            } else {
                Some((
                    dir.clone(),
                    DirectoryListing {
                        dirs: listing.dirs.clone(),
                        files,
                    },
                ))
            }
        })
        .collect();

    ProjectSnapshot::new(snapshot.version.clone(), organisation, files_content)
}
