//! Discovery of logical configuration files across the update and setup trees.

use super::file::{TemplateLayout, WorkspaceFile, BACKUP_SUFFIX};
use crate::error::ReconcileError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Collect every template file of both trees, one entry per relative path,
/// ordered by path.
pub fn discover(layout: &TemplateLayout) -> Result<Vec<WorkspaceFile>, ReconcileError> {
    let mut files: BTreeMap<PathBuf, WorkspaceFile> = BTreeMap::new();

    for root in [layout.update_root(), layout.setup_root()] {
        for relative in collect_template_paths(root)? {
            if !files.contains_key(&relative) {
                let file = layout.file(relative.clone());
                files.insert(relative, file);
            }
        }
    }

    info!("Collected {} configuration files.", files.len());
    Ok(files.into_values().collect())
}

/// Relative paths of all accepted regular files below `root`.
///
/// Unreadable entries are logged and skipped.
fn collect_template_paths(root: &Path) -> Result<Vec<PathBuf>, ReconcileError> {
    if !root.is_dir() {
        return Err(ReconcileError::MissingTemplateDirectory(root.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "Skipping unreadable template entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_accepted(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            paths.push(relative.to_path_buf());
        }
    }
    Ok(paths)
}

fn is_accepted(path: &Path) -> bool {
    !path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(BACKUP_SUFFIX))
        .unwrap_or(false)
}
