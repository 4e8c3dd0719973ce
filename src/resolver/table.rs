//! Replacement table: variable name to literal replacement, built once per run.

use crate::fragment::Fragment;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Variable always bound to the directory the configurator was started from.
pub const WORKING_DIRECTORY_VARIABLE: &str = "client.env.home";

/// Mapping from variable name to replacement, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: BTreeMap<String, String>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the run's table: entries of the optional external properties file,
    /// then the working-directory binding on top.
    ///
    /// A missing or unreadable file is logged and leaves only the binding.
    pub fn load(external: Option<&Path>, working_directory: &Path) -> Self {
        let mut table = match external {
            Some(path) if path.is_file() => match Fragment::load(path) {
                Ok(fragment) => {
                    info!(
                        path = %path.display(),
                        entries = fragment.len(),
                        "Loaded replacement properties"
                    );
                    fragment.into_iter().collect()
                }
                Err(e) => {
                    warn!(error = %e, "Could not read replacement properties, continuing without these.");
                    Self::new()
                }
            },
            Some(path) => {
                warn!(
                    path = %path.display(),
                    "Replacement properties file not found, continuing without these."
                );
                Self::new()
            }
            None => Self::new(),
        };
        table.insert(
            WORKING_DIRECTORY_VARIABLE,
            working_directory.display().to_string(),
        );
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ReplacementTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = ReplacementTable::new();
        for (name, value) in iter {
            table.insert(name, value);
        }
        table
    }
}
