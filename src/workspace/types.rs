//! Run reports for reconcile and harvest passes.

use super::file::WorkspaceFile;
use crate::destination::WriteOutcome;
use serde::Serialize;

/// Action taken for one file during a setup/update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    MergedPreferences(WriteOutcome),
    ResolvedDocument(WriteOutcome),
    Copied,
    /// No usable template source for this file.
    Skipped,
}

/// A file whose processing failed; the run continued without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub relative_path: String,
    pub reason: String,
}

impl FileFailure {
    pub fn new(file: &WorkspaceFile, reason: impl ToString) -> Self {
        Self {
            relative_path: file.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Summary of a setup/update run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub discovered: usize,
    pub merged: usize,
    pub resolved_documents: usize,
    pub copied: usize,
    /// Merges whose output matched the existing workspace file.
    pub unchanged: usize,
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl ReconcileReport {
    pub fn record(&mut self, action: FileAction) {
        match action {
            FileAction::MergedPreferences(WriteOutcome::Written) => self.merged += 1,
            FileAction::ResolvedDocument(WriteOutcome::Written) => self.resolved_documents += 1,
            FileAction::MergedPreferences(WriteOutcome::Unchanged)
            | FileAction::ResolvedDocument(WriteOutcome::Unchanged) => self.unchanged += 1,
            FileAction::Copied => self.copied += 1,
            FileAction::Skipped => self.skipped += 1,
        }
    }
}

/// Summary of a save-changes run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestReport {
    /// Property files considered for harvesting.
    pub examined: usize,
    pub saved: usize,
    pub unchanged: usize,
    /// Property files without a workspace copy.
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}
