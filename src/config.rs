//! Configuration System
//!
//! Layered configuration for a configurator run: built-in defaults, an optional
//! TOML file, the path environment variables and finally command-line
//! overrides applied by the caller.

use crate::error::ConfiguratorError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod paths;
mod sources;

pub use paths::{relocate_legacy_workspace, RunPaths, METADATA_FOLDER, PLUGINS_FOLDER};
pub use sources::config_file::{default_config_path, DEFAULT_CONFIG_FILE};
pub use sources::environment::{REPLACEMENTS_PATH_VAR, TEMPLATES_PATH_VAR, WORKSPACE_PATH_VAR};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfiguratorConfig {
    /// Eclipse workspace directory.
    #[serde(default)]
    pub workspace_path: Option<PathBuf>,

    /// Directory holding the `setup` and `update` template trees.
    #[serde(default)]
    pub templates_path: Option<PathBuf>,

    /// Additional replacement patterns (`.properties` format).
    #[serde(default)]
    pub replacements_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads [`ConfiguratorConfig`] from its layered sources.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with the implicit config file of `working_directory` and the
    /// process environment.
    pub fn load(working_directory: &Path) -> Result<ConfiguratorConfig, ConfiguratorError> {
        Self::load_with_env(working_directory, None, |name| std::env::var(name).ok())
    }

    /// Load with an explicit config file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<ConfiguratorConfig, ConfiguratorError> {
        let working_directory = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load_with_env(working_directory, Some(path), |name| std::env::var(name).ok())
    }

    /// Load reading variables through `lookup` instead of the process
    /// environment.
    pub fn load_with_env<F>(
        working_directory: &Path,
        config_file: Option<&Path>,
        lookup: F,
    ) -> Result<ConfiguratorConfig, ConfiguratorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = match config_file {
            Some(path) => sources::config_file::add_explicit_to_builder(builder, path)?,
            None => sources::config_file::add_default_to_builder(builder, working_directory)?,
        };
        let builder = sources::environment::add_vars_to_builder(builder, lookup)?;

        let config = builder.build()?.try_deserialize::<ConfiguratorConfig>()?;
        Ok(config)
    }
}
