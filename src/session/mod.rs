//! Explicit selection context for snapshot workflows.
//!
//! A [`Session`] holds the selected project, version and files and is passed
//! to every workflow instead of living in process-wide state, so several
//! projects can be handled side by side.

mod state;

pub use state::SessionState;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContextError, Result};
use crate::exclusion::ExclusionRules;
use crate::paths::ProjectPaths;
use crate::render;
use crate::settings::Settings;
use crate::snapshot::{self, ProjectSnapshot, SnapshotStore};

/// A project directory with its store, paths and exclusion rules
#[derive(Debug, Clone)]
pub struct Project {
    paths: ProjectPaths,
    rules: ExclusionRules,
    store: SnapshotStore,
}

impl Project {
    /// Open a project, creating its store folder and exclusion file if needed
    pub fn open(root: impl Into<PathBuf>, settings: &Settings) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ContextError::ProjectRootMissing(root));
        }

        let paths = ProjectPaths::with_store_name(root, &settings.store_dir_name);
        let rules = ExclusionRules::from_settings(settings);
        let store = SnapshotStore::new(paths.store_dir());
        store.ensure_initialized(&rules)?;

        Ok(Project {
            paths,
            rules,
            store,
        })
    }

    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    /// Scan the project tree with freshly loaded exclusion rules
    pub fn scan(&mut self) -> Result<ProjectSnapshot> {
        snapshot::scan(&self.paths, &mut self.rules)
    }

    /// Write `context.md` and `context.html` for a snapshot
    pub fn export_full_context(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        write_document(&self.paths.context_md(), &render::to_markdown(snapshot))?;
        write_document(&self.paths.context_html(), &render::to_html(snapshot))?;
        Ok(())
    }

    /// Write `selected_context.md` and `selected_context.html` for a subset of files
    pub fn export_selected_context<S: AsRef<str>>(
        &self,
        snapshot: &ProjectSnapshot,
        selected: &[S],
    ) -> Result<ProjectSnapshot> {
        let filtered = snapshot::filter(snapshot, selected);
        write_document(&self.paths.selected_context_md(), &render::to_markdown(&filtered))?;
        write_document(&self.paths.selected_context_html(), &render::to_html(&filtered))?;
        Ok(filtered)
    }
}

fn write_document(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| ContextError::io(path, e))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Current project, version and file selection
#[derive(Debug, Clone, Default)]
pub struct Session {
    project: Option<Project>,
    selected_version: Option<String>,
    selected_files: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a project; clears any version and file selection
    pub fn select_project(&mut self, root: impl Into<PathBuf>, settings: &Settings) -> Result<()> {
        let project = Project::open(root, settings)?;
        log::info!("Selected project {}", project.root().display());
        self.project = Some(project);
        self.selected_version = None;
        self.selected_files.clear();
        Ok(())
    }

    pub fn has_project(&self) -> bool {
        self.project.is_some()
    }

    pub fn project(&self) -> Result<&Project> {
        self.project.as_ref().ok_or(ContextError::ProjectNotSelected)
    }

    fn project_mut(&mut self) -> Result<&mut Project> {
        self.project.as_mut().ok_or(ContextError::ProjectNotSelected)
    }

    pub fn select_version(&mut self, version: impl Into<String>) {
        self.selected_version = Some(version.into());
    }

    pub fn selected_version(&self) -> Result<&str> {
        self.selected_version
            .as_deref()
            .ok_or(ContextError::NoVersionSelected)
    }

    pub fn set_selected_files(&mut self, files: Vec<String>) {
        self.selected_files = files;
    }

    pub fn selected_files(&self) -> &[String] {
        &self.selected_files
    }

    /// Scan, save and export the whole project; the new version becomes selected
    pub fn extract_full_project(&mut self) -> Result<ProjectSnapshot> {
        let project = self.project_mut()?;
        let snapshot = project.scan()?;
        project.store().save(&snapshot)?;
        project.export_full_context(&snapshot)?;

        self.selected_version = Some(snapshot.version.clone());
        Ok(snapshot)
    }

    /// Versions of the selected project in numeric order
    pub fn available_versions(&self) -> Result<Vec<String>> {
        self.project()?.store().list_versions()
    }

    /// Load the selected version
    pub fn load_selected(&self) -> Result<ProjectSnapshot> {
        let version = self.selected_version()?;
        self.project()?.store().load(version)
    }

    /// Delete the selected version's documents and clear the selection
    pub fn delete_selected_version(&mut self) -> Result<String> {
        let version = self.selected_version()?.to_string();
        self.delete_version(&version)?;
        Ok(version)
    }

    /// Delete a version's documents
    ///
    /// The version and file selection is cleared only when it points at the
    /// deleted version.
    pub fn delete_version(&mut self, version: &str) -> Result<()> {
        self.project()?.store().delete(version)?;
        if self.selected_version.as_deref() == Some(version) {
            self.selected_version = None;
            self.selected_files.clear();
        }
        Ok(())
    }

    /// Sorted file paths of the selected version
    pub fn files_in_selected_version(&self) -> Result<Vec<String>> {
        Ok(self.load_selected()?.file_paths())
    }

    /// Export the selected files of the selected version
    pub fn export_selected_context(&self) -> Result<ProjectSnapshot> {
        let snapshot = self.load_selected()?;
        self.project()?
            .export_selected_context(&snapshot, self.selected_files.as_slice())
    }

    /// Restore every file of the selected version into the project
    pub fn restore_full_version(&self) -> Result<usize> {
        let snapshot = self.load_selected()?;
        snapshot::restore_all(self.project()?.root(), &snapshot)
    }

    /// Restore only the selected files of the selected version
    pub fn restore_selected_files(&self) -> Result<usize> {
        let snapshot = self.load_selected()?;
        snapshot::restore_selected(
            self.project()?.root(),
            &snapshot,
            self.selected_files.as_slice(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_operations_require_project() {
        let mut session = Session::new();
        assert!(matches!(
            session.extract_full_project(),
            Err(ContextError::ProjectNotSelected)
        ));
        assert!(matches!(
            session.available_versions(),
            Err(ContextError::ProjectNotSelected)
        ));
    }

    #[test]
    fn test_operations_require_version() {
        let temp = tempdir().unwrap();
        let mut session = Session::new();
        session.select_project(temp.path(), &Settings::default()).unwrap();

        assert!(matches!(
            session.restore_full_version(),
            Err(ContextError::NoVersionSelected)
        ));
        assert!(matches!(
            session.delete_selected_version(),
            Err(ContextError::NoVersionSelected)
        ));
    }

    #[test]
    fn test_select_project_initializes_store() {
        let temp = tempdir().unwrap();
        let mut session = Session::new();
        session.select_project(temp.path(), &Settings::default()).unwrap();

        let exclude = temp.path().join("code_source").join("exclude.txt");
        assert!(exclude.is_file());
        assert!(session.has_project());
    }

    #[test]
    fn test_select_missing_project() {
        let temp = tempdir().unwrap();
        let mut session = Session::new();
        let err = session
            .select_project(temp.path().join("nope"), &Settings::default())
            .unwrap_err();
        assert!(matches!(err, ContextError::ProjectRootMissing(_)));
        assert!(!session.has_project());
    }

    #[test]
    fn test_extract_selects_and_exports() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "print(1)").unwrap();

        let mut session = Session::new();
        session.select_project(temp.path(), &Settings::default()).unwrap();

        let snapshot = session.extract_full_project().unwrap();
        assert_eq!(snapshot.version, "001");
        assert_eq!(snapshot.file_paths(), vec!["a.py"]);
        assert_eq!(session.selected_version().unwrap(), "001");

        let store = temp.path().join("code_source");
        assert!(store.join("context.md").is_file());
        assert!(store.join("context.html").is_file());

        assert_eq!(session.extract_full_project().unwrap().version, "002");
        assert_eq!(session.available_versions().unwrap(), vec!["001", "002"]);
    }

    #[test]
    fn test_deleting_other_version_keeps_selection() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "print(1)").unwrap();

        let mut session = Session::new();
        session.select_project(temp.path(), &Settings::default()).unwrap();
        session.extract_full_project().unwrap();
        session.extract_full_project().unwrap();
        session.set_selected_files(vec!["a.py".to_string()]);

        session.delete_version("001").unwrap();

        assert_eq!(session.available_versions().unwrap(), vec!["002"]);
        assert_eq!(session.selected_version().unwrap(), "002");
        assert_eq!(session.selected_files(), ["a.py".to_string()]);

        session.delete_version("002").unwrap();
        assert!(session.selected_version().is_err());
        assert!(session.selected_files().is_empty());
    }

    #[test]
    fn test_sessions_do_not_share_selection() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("one.txt"), "1").unwrap();
        fs::write(second.path().join("two.txt"), "2").unwrap();

        let mut a = Session::new();
        let mut b = Session::new();
        a.select_project(first.path(), &Settings::default()).unwrap();
        b.select_project(second.path(), &Settings::default()).unwrap();
        a.extract_full_project().unwrap();
        b.extract_full_project().unwrap();

        assert_eq!(a.files_in_selected_version().unwrap(), vec!["one.txt"]);
        assert_eq!(b.files_in_selected_version().unwrap(), vec!["two.txt"]);
    }
}
