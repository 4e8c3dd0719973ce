//! Config file source: `--config <path>` or `eclipse-configurator.toml` in the
//! working directory.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "eclipse-configurator.toml";

/// Path of the implicit config file for `working_directory`.
pub fn default_config_path(working_directory: &Path) -> PathBuf {
    working_directory.join(DEFAULT_CONFIG_FILE)
}

/// Add the implicit config file to the builder if it exists.
pub fn add_default_to_builder(
    builder: ConfigBuilder<DefaultState>,
    working_directory: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = default_config_path(working_directory);
    if path.is_file() {
        debug!(config_path = %path.display(), "Using configuration file");
        Ok(builder.add_source(File::from(path).required(false)))
    } else {
        Ok(builder)
    }
}

/// Add an explicitly requested config file; it must exist.
pub fn add_explicit_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    debug!(config_path = %path.display(), "Using configuration file");
    Ok(builder.add_source(File::from(path).required(true)))
}
