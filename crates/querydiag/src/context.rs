use crate::{Phrases, Position, ResourceLookup};

/// A context label naming the construct an error was found in,
/// e.g. `"ORDER BY clause"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Shown as written
    Literal(String),
    /// Looked up in a resource table before display
    ResourceKey(String),
}

impl Label {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn resource_key(key: impl Into<String>) -> Self {
        Self::ResourceKey(key.into())
    }

    /// Turn the label into display text.
    ///
    /// Returns `None` when the text is empty or the resource key has no entry.
    #[must_use]
    pub fn resolve(&self, lookup: &dyn ResourceLookup) -> Option<String> {
        let text = match self {
            Self::Literal(text) => Some(text.clone()),
            Self::ResourceKey(key) => lookup.lookup(key),
        };
        text.filter(|text| !text.is_empty())
    }
}

/// Render the phrase that follows "near" in an error message:
/// `"[<label>, ]<line> L, <column> C"`.
///
/// Returns an empty string when there is neither a label nor a position. A
/// label without a position keeps its trailing `", "`.
#[must_use]
pub fn format_context(label: Option<&str>, position: Option<Position>, phrases: &Phrases) -> String {
    let label = label.filter(|label| !label.is_empty());
    let mut phrase = String::new();

    if let Some(label) = label {
        phrase.push_str(label);
        phrase.push_str(", ");
    }

    if let Some(Position { line, column }) = position {
        phrase.push_str(&format!(
            "{} {line}, {} {column}",
            phrases.line, phrases.column
        ));
    }

    phrase
}
