//! Re-exports for consumers that depend on `crate::workspace` only.

pub use super::discovery::discover;
pub use super::file::{
    FileKind, TemplateLayout, WorkspaceFile, BACKUP_SUFFIX, SETUP_FOLDER, UPDATE_FOLDER,
};
pub use super::reconciler::Reconciler;
pub use super::types::{FileAction, FileFailure, HarvestReport, ReconcileReport};
