//! Effective run paths, including the relocation for legacy template layouts.

use super::sources::environment::{TEMPLATES_PATH_VAR, WORKSPACE_PATH_VAR};
use super::ConfiguratorConfig;
use crate::error::ConfiguratorError;
use crate::workspace::{TemplateLayout, UPDATE_FOLDER};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Workspace metadata folder name.
pub const METADATA_FOLDER: &str = ".metadata";
/// Plugin configuration folder inside the metadata folder.
pub const PLUGINS_FOLDER: &str = ".plugins";

/// Absolute paths a run works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    pub working_directory: PathBuf,
    /// Workspace root after legacy relocation.
    pub workspace_root: PathBuf,
    pub templates_root: PathBuf,
    pub replacements_file: Option<PathBuf>,
}

impl RunPaths {
    /// Resolve configured paths against `working_directory`.
    ///
    /// Fails when the workspace or templates path is missing.
    pub fn resolve(
        config: &ConfiguratorConfig,
        working_directory: &Path,
    ) -> Result<Self, ConfiguratorError> {
        let workspace = config
            .workspace_path
            .as_deref()
            .ok_or_else(|| ConfiguratorError::MissingVariable(WORKSPACE_PATH_VAR.to_string()))?;
        let templates = config
            .templates_path
            .as_deref()
            .ok_or_else(|| ConfiguratorError::MissingVariable(TEMPLATES_PATH_VAR.to_string()))?;

        let templates_root = working_directory.join(templates);
        let workspace_root = relocate_legacy_workspace(
            &working_directory.join(workspace),
            &templates_root.join(UPDATE_FOLDER),
        );

        let replacements_file = match config.replacements_path.as_deref() {
            Some(path) => Some(working_directory.join(path)),
            None => {
                warn!(
                    "Variable '{}' was not found. This is an optional variable - resuming.",
                    super::sources::environment::REPLACEMENTS_PATH_VAR
                );
                None
            }
        };

        Ok(Self {
            working_directory: working_directory.to_path_buf(),
            workspace_root,
            templates_root,
            replacements_file,
        })
    }

    pub fn layout(&self) -> TemplateLayout {
        TemplateLayout::new(self.workspace_root.clone(), &self.templates_root)
    }
}

/// Effective workspace root for the given update template tree.
///
/// Current layouts carry a `.metadata` folder in the templates. Older ones hold
/// the content of `.metadata` directly, or even only the content of
/// `.metadata/.plugins`; the workspace root is moved down to match.
pub fn relocate_legacy_workspace(workspace_root: &Path, update_root: &Path) -> PathBuf {
    if update_root.join(METADATA_FOLDER).is_dir() {
        return workspace_root.to_path_buf();
    }

    let suffix = if update_root.join(PLUGINS_FOLDER).is_dir() {
        PathBuf::from(METADATA_FOLDER)
    } else {
        Path::new(METADATA_FOLDER).join(PLUGINS_FOLDER)
    };
    info!("No .metadata folder found. Relocated to {}", suffix.display());
    workspace_root.join(suffix)
}
