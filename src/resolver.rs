//! Variable Resolver
//!
//! Substitutes `${name}` placeholders using a layered lookup (replacement table,
//! then ambient process properties, then environment variables) and performs
//! the inverse transform that turns concrete values back into placeholders.

mod sources;
mod table;

pub use sources::{AmbientProperties, ProcessEnvironment, VariableSource};
pub use table::{ReplacementTable, WORKING_DIRECTORY_VARIABLE};

use regex_lite::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Opening token of a placeholder.
pub const PLACEHOLDER_PREFIX: &str = "${";
/// Closing token of a placeholder.
pub const PLACEHOLDER_SUFFIX: &str = "}";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// Format `name` as a placeholder token.
pub fn placeholder(name: &str) -> String {
    format!("{}{}{}", PLACEHOLDER_PREFIX, name, PLACEHOLDER_SUFFIX)
}

/// Resolves and re-abstracts placeholders for one run.
///
/// The table is fixed at construction; the resolver is shared read-only by
/// every handler.
pub struct Resolver {
    table: ReplacementTable,
    fallbacks: Vec<Box<dyn VariableSource>>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("table", &self.table)
            .field("fallbacks", &self.fallbacks.len())
            .finish()
    }
}

impl Resolver {
    /// Resolver with explicit fallback sources, consulted in order after the table.
    pub fn new(table: ReplacementTable, fallbacks: Vec<Box<dyn VariableSource>>) -> Self {
        Self { table, fallbacks }
    }

    /// Resolver using the standard chain: table, `ambient`, process environment.
    pub fn with_process_fallbacks(table: ReplacementTable, ambient: AmbientProperties) -> Self {
        Self::new(table, vec![Box::new(ambient), Box::new(ProcessEnvironment)])
    }

    /// Resolver that only consults the table.
    pub fn table_only(table: ReplacementTable) -> Self {
        Self::new(table, Vec::new())
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Look up a single variable through the chain.
    pub fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        if let Some(value) = self.table.get(name) {
            return Some(Cow::Borrowed(value));
        }
        self.fallbacks
            .iter()
            .find_map(|source| source.lookup(name))
            .map(Cow::Owned)
    }

    /// Replace every `${name}` in `text` whose name resolves; unknown
    /// placeholders stay verbatim. Replacements are not re-scanned.
    ///
    /// An empty table short-circuits to the input without consulting the
    /// fallback sources.
    pub fn resolve<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.table.is_empty() {
            return Cow::Borrowed(text);
        }
        placeholder_pattern().replace_all(text, |caps: &Captures<'_>| {
            match self.lookup(&caps[1]) {
                Some(value) => value.into_owned(),
                None => caps[0].to_string(),
            }
        })
    }

    /// Replace every literal occurrence of each table value with its
    /// placeholder, entry by entry in key order.
    pub fn unresolve(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (name, value) in self.table.iter() {
            if value.is_empty() {
                continue;
            }
            if result.contains(value) {
                result = result.replace(value, &placeholder(name));
            }
        }
        result
    }
}
