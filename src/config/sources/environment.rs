//! Environment source: the path variables the configurator has always been
//! driven by.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

/// Eclipse workspace directory.
pub const WORKSPACE_PATH_VAR: &str = "WORKSPACE_PATH";
/// Directory holding the `setup` and `update` template trees.
pub const TEMPLATES_PATH_VAR: &str = "ECLIPSE_TEMPLATES_PATH";
/// Optional `.properties` file with additional replacement patterns.
pub const REPLACEMENTS_PATH_VAR: &str = "REPLACEMENT_PATTERNS_PATH";

/// Environment variable to configuration key.
const VARIABLE_KEYS: &[(&str, &str)] = &[
    (WORKSPACE_PATH_VAR, "workspace_path"),
    (TEMPLATES_PATH_VAR, "templates_path"),
    (REPLACEMENTS_PATH_VAR, "replacements_path"),
];

/// Add variables obtained from `lookup`; empty values count as unset.
pub fn add_vars_to_builder<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (variable, key) in VARIABLE_KEYS {
        if let Some(value) = lookup(variable).filter(|v| !v.is_empty()) {
            builder = builder.set_override(*key, value)?;
        }
    }
    Ok(builder)
}
