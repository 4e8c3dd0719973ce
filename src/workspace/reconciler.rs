//! Workspace Reconciler: drives discovery, strategy selection and per-file
//! merging or harvesting.

use super::discovery::discover;
use super::file::{FileKind, TemplateLayout, WorkspaceFile};
use super::types::{FileAction, FileFailure, HarvestReport, ReconcileReport};
use crate::destination::copy_file;
use crate::document::DocumentResolver;
use crate::error::{FileError, ReconcileError};
use crate::prefs::{HarvestOutcome, PreferenceMerger};
use crate::resolver::Resolver;
use std::sync::Arc;
use tracing::{debug, error};

/// Reconciles a workspace against its setup and update templates.
#[derive(Debug, Clone)]
pub struct Reconciler {
    layout: TemplateLayout,
    prefs: PreferenceMerger,
    documents: DocumentResolver,
}

impl Reconciler {
    pub fn new(layout: TemplateLayout, resolver: Arc<Resolver>) -> Self {
        Self {
            layout,
            prefs: PreferenceMerger::new(Arc::clone(&resolver)),
            documents: DocumentResolver::new(resolver),
        }
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Create or update every workspace file from its templates.
    ///
    /// Only discovery errors abort the run; a failing file is logged, recorded
    /// in the report and skipped.
    pub fn update_workspace(&self) -> Result<ReconcileReport, ReconcileError> {
        let files = discover(&self.layout)?;
        let mut report = ReconcileReport {
            discovered: files.len(),
            ..Default::default()
        };

        for file in &files {
            match self.merge_file(file) {
                Ok(action) => {
                    debug!(path = %file, ?action, "Processed workspace file");
                    report.record(action);
                }
                Err(e) => {
                    error!(path = %file, error = %e, "Failed to update workspace file");
                    report.failures.push(FileFailure::new(file, e));
                }
            }
        }

        Ok(report)
    }

    /// Apply the strategy selected by the file's extension.
    pub fn merge_file(&self, file: &WorkspaceFile) -> Result<FileAction, FileError> {
        if file.kind() == FileKind::Preferences {
            let outcome =
                self.prefs
                    .merge_for_setup_or_update(file.workspace(), file.setup(), file.update())?;
            return Ok(FileAction::MergedPreferences(outcome));
        }

        let Some(source) = file.template_source() else {
            return Ok(FileAction::Skipped);
        };

        if file.kind() == FileKind::Document {
            let outcome = self.documents.update(source, file.workspace())?;
            Ok(FileAction::ResolvedDocument(outcome))
        } else {
            copy_file(source, file.workspace()).map_err(|e| FileError::Copy {
                source_path: source.to_path_buf(),
                destination: file.workspace().to_path_buf(),
                source: e,
            })?;
            Ok(FileAction::Copied)
        }
    }

    /// Harvest workspace edits of `.prefs` files back into the update templates.
    /// Other file kinds are ignored.
    pub fn save_changes_in_workspace(
        &self,
        include_new: bool,
    ) -> Result<HarvestReport, ReconcileError> {
        let files = discover(&self.layout)?;
        let mut report = HarvestReport::default();

        for file in files.iter().filter(|f| f.kind() == FileKind::Preferences) {
            report.examined += 1;
            match self
                .prefs
                .save_changes(file.workspace(), file.update(), include_new)
            {
                Ok(HarvestOutcome::Saved { .. }) => report.saved += 1,
                Ok(HarvestOutcome::NoChanges) | Ok(HarvestOutcome::Unchanged) => {
                    report.unchanged += 1
                }
                Ok(HarvestOutcome::NoWorkspaceCopy) => report.skipped += 1,
                Err(e) => {
                    error!(path = %file, error = %e, "Failed to save workspace changes");
                    report.failures.push(FileFailure::new(file, e));
                }
            }
        }

        Ok(report)
    }
}
