//! Logical configuration files and the template layout they are resolved against.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Folder under the templates root holding first-time setup templates.
pub const SETUP_FOLDER: &str = "setup";
/// Folder under the templates root holding templates re-applied on every run.
pub const UPDATE_FOLDER: &str = "update";
/// Files ending in this suffix are never treated as templates.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Merge strategy selected from a file name's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `.prefs` key-value fragments.
    Preferences,
    /// `.xml`, `.xmi` and `.launch` element trees.
    Document,
    /// Anything else, copied byte for byte.
    Opaque,
}

impl FileKind {
    /// Classify by file-name suffix, so a file named just `.prefs` is still
    /// a preferences file.
    pub fn classify(path: &Path) -> Self {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return FileKind::Opaque,
        };
        if name.ends_with(".prefs") {
            FileKind::Preferences
        } else if [".xml", ".xmi", ".launch"].iter().any(|suffix| name.ends_with(suffix)) {
            FileKind::Document
        } else {
            FileKind::Opaque
        }
    }
}

/// Roots of the three trees a run reconciles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    workspace_root: PathBuf,
    setup_root: PathBuf,
    update_root: PathBuf,
}

impl TemplateLayout {
    /// Layout with `setup/` and `update/` below `templates_root`.
    pub fn new(workspace_root: impl Into<PathBuf>, templates_root: &Path) -> Self {
        Self::from_roots(
            workspace_root,
            templates_root.join(SETUP_FOLDER),
            templates_root.join(UPDATE_FOLDER),
        )
    }

    pub fn from_roots(
        workspace_root: impl Into<PathBuf>,
        setup_root: impl Into<PathBuf>,
        update_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            setup_root: setup_root.into(),
            update_root: update_root.into(),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn setup_root(&self) -> &Path {
        &self.setup_root
    }

    pub fn update_root(&self) -> &Path {
        &self.update_root
    }

    /// The logical file at `relative_path` within this layout.
    pub fn file(&self, relative_path: impl Into<PathBuf>) -> WorkspaceFile {
        WorkspaceFile::new(
            relative_path,
            &self.workspace_root,
            &self.setup_root,
            &self.update_root,
        )
    }
}

/// One configuration file identified by its path relative to the template roots.
///
/// Equality and hashing only consider the relative path.
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    relative_path: PathBuf,
    workspace: PathBuf,
    setup: PathBuf,
    update: PathBuf,
}

impl WorkspaceFile {
    pub fn new(
        relative_path: impl Into<PathBuf>,
        workspace_root: &Path,
        setup_root: &Path,
        update_root: &Path,
    ) -> Self {
        let relative_path = relative_path.into();
        Self {
            workspace: workspace_root.join(&relative_path),
            setup: setup_root.join(&relative_path),
            update: update_root.join(&relative_path),
            relative_path,
        }
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Location in the workspace; may not exist before the first setup.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn setup(&self) -> &Path {
        &self.setup
    }

    pub fn update(&self) -> &Path {
        &self.update
    }

    pub fn kind(&self) -> FileKind {
        FileKind::classify(&self.relative_path)
    }

    /// Template to apply for non-property files: the update copy when present,
    /// else the setup copy, but only while the workspace copy does not exist.
    pub fn template_source(&self) -> Option<&Path> {
        if self.update.exists() {
            Some(&self.update)
        } else if self.setup.exists() && !self.workspace.exists() {
            Some(&self.setup)
        } else {
            None
        }
    }
}

impl PartialEq for WorkspaceFile {
    fn eq(&self, other: &Self) -> bool {
        self.relative_path == other.relative_path
    }
}

impl Eq for WorkspaceFile {}

impl Hash for WorkspaceFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relative_path.hash(state);
    }
}

impl fmt::Display for WorkspaceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative_path.display())
    }
}
