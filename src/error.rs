//! Error types for the workspace configurator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reading or writing a key-value configuration fragment.
#[derive(Debug, Error)]
pub enum FragmentError {
    #[error("Fragment I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed fragment {} at line {line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl FragmentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FragmentError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading, resolving or writing a structured document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to serialize document for {}: {reason}", .path.display())]
    Serialize { path: PathBuf, reason: String },
}

/// Errors that stop discovery of the template trees.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Expected template directory: {}", .0.display())]
    MissingTemplateDirectory(PathBuf),
}

/// Errors contained at the boundary of a single workspace file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Fragment(#[from] FragmentError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(
        "Failed to copy {} into workspace at {}: {source}",
        .source_path.display(),
        .destination.display()
    )]
    Copy {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum ConfiguratorError {
    #[error("Variable '{0}' was not found. This variable is required in order to run the application.")]
    MissingVariable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to determine the current working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

impl From<config::ConfigError> for ConfiguratorError {
    fn from(err: config::ConfigError) -> Self {
        ConfiguratorError::ConfigError(err.to_string())
    }
}
