//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ConfiguratorError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ConfiguratorError) -> String {
    match e {
        ConfiguratorError::MissingVariable(_) => format!(
            "{}\nSet it in the environment, the configuration file or on the command line.",
            e
        ),
        _ => e.to_string(),
    }
}
