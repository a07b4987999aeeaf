use std::collections::HashMap;

/// Read-only lookup of localized display strings by resource key.
///
/// Implementations are shared across compilation threads and must tolerate
/// concurrent reads.
pub trait ResourceLookup: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl ResourceLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// A lookup with no entries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceLookup for NoResources {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// In-memory resource table, usually loaded from a config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    entries: HashMap<String, String>,
}

impl StringTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for StringTable {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl ResourceLookup for StringTable {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// The display words spliced into messages and context phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrases {
    pub near: String,
    pub line: String,
    pub column: String,
}

impl Phrases {
    pub const NEAR_KEY: &'static str = "querydiag.near";
    pub const LINE_KEY: &'static str = "querydiag.line";
    pub const COLUMN_KEY: &'static str = "querydiag.column";

    /// Read the phrases from a resource table, keeping the English default
    /// for any key that is missing or blank.
    #[must_use]
    pub fn from_lookup(lookup: &dyn ResourceLookup) -> Self {
        let defaults = Self::default();
        let pick = |key: &str, fallback: String| {
            lookup
                .lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(fallback)
        };

        Self {
            near: pick(Self::NEAR_KEY, defaults.near),
            line: pick(Self::LINE_KEY, defaults.line),
            column: pick(Self::COLUMN_KEY, defaults.column),
        }
    }
}

impl Default for Phrases {
    fn default() -> Self {
        Self {
            near: "near".to_string(),
            line: "line".to_string(),
            column: "column".to_string(),
        }
    }
}
