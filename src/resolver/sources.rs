//! Fallback variable sources consulted when the replacement table has no entry.

use std::collections::BTreeMap;
use std::path::Path;

/// A named-value lookup the resolver can fall back to.
pub trait VariableSource: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Process-level properties derived from the running environment, plus any
/// `NAME=VALUE` definitions supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct AmbientProperties {
    values: BTreeMap<String, String>,
}

impl AmbientProperties {
    /// An empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties derived from the current process: working directory, home,
    /// user and platform details.
    pub fn detect(working_directory: &Path) -> Self {
        let mut properties = Self::new();
        properties.set("user.dir", working_directory.display().to_string());
        if let Some(dirs) = directories::BaseDirs::new() {
            properties.set("user.home", dirs.home_dir().display().to_string());
        }
        if let Some(user) = std::env::var("USER")
            .ok()
            .or_else(|| std::env::var("USERNAME").ok())
        {
            properties.set("user.name", user);
        }
        properties.set("os.name", std::env::consts::OS);
        properties.set("os.arch", std::env::consts::ARCH);
        properties.set("file.separator", std::path::MAIN_SEPARATOR.to_string());
        properties.set("path.separator", if cfg!(windows) { ";" } else { ":" });
        properties.set("line.separator", if cfg!(windows) { "\r\n" } else { "\n" });
        properties.set("java.io.tmpdir", std::env::temp_dir().display().to_string());
        properties
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Apply `NAME=VALUE` definitions; they override detected values.
    pub fn with_definitions<I, S>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        for (name, value) in definitions {
            self.set(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl VariableSource for AmbientProperties {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }
}

/// Process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl VariableSource for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
