//! Configuration fragments.
//!
//! A fragment is one file's worth of `key=value` settings. Keys are unique and
//! kept in lexicographic order, so storing an unchanged fragment always yields
//! the same bytes.

pub mod codec;

use crate::destination::{write_if_changed, WriteOutcome};
use crate::error::FragmentError;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Ordered key-value configuration unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    entries: BTreeMap<String, String>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy every entry of `other` on top of this fragment; keys of `other` win.
    pub fn overlay(&mut self, other: &Fragment) {
        for (key, value) in other.iter() {
            self.entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Replace every value with `f(value)`.
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for value in self.entries.values_mut() {
            *value = f(value);
        }
    }

    /// Decode fragment text. `path` is only used for error reporting.
    pub fn parse(text: &str, path: &Path) -> Result<Self, FragmentError> {
        let pairs = codec::parse(text).map_err(|e| FragmentError::Malformed {
            path: path.to_path_buf(),
            line: e.line,
            reason: e.reason,
        })?;
        Ok(pairs.into_iter().collect())
    }

    /// Serialized text: one `key=value` line per entry in key order.
    pub fn to_text(&self) -> String {
        codec::serialize(self.iter())
    }

    /// Load a fragment file that is expected to exist.
    pub fn load(path: &Path) -> Result<Self, FragmentError> {
        let bytes = fs::read(path).map_err(|e| FragmentError::io(path, e))?;
        let text = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            FragmentError::Malformed {
                path: path.to_path_buf(),
                line: valid.iter().filter(|b| **b == b'\n').count() + 1,
                reason: "Invalid UTF-8".to_string(),
            }
        })?;
        Self::parse(&text, path)
    }

    /// Load a fragment that may legitimately be absent.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`; a present but
    /// unreadable or corrupt file is an error.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, FragmentError> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load a fragment, degrading to an empty one when it is absent or broken.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load_optional(path) {
            Ok(Some(fragment)) => fragment,
            Ok(None) => {
                debug!(path = %path.display(), "Fragment not found, using empty fragment");
                Self::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not read properties, continuing with empty fragment");
                Self::new()
            }
        }
    }

    /// Persist the fragment, creating parent directories and skipping the
    /// write when the file already holds identical content.
    pub fn store(&self, path: &Path) -> Result<WriteOutcome, FragmentError> {
        write_if_changed(path, self.to_text().as_bytes()).map_err(|e| FragmentError::io(path, e))
    }
}

impl<K, V> FromIterator<(K, V)> for Fragment
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fragment = Fragment::new();
        for (key, value) in iter {
            fragment.insert(key, value);
        }
        fragment
    }
}

impl IntoIterator for Fragment {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
