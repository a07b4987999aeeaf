use crate::{
    format_context, format_message, normalize, BoxError, DiagnosticState, DiagnosticsError, Label,
    LineIndex, LineTerminators, NoResources, Phrases, QueryError, ResourceLookup, Result,
    StringTable,
};
use querydiag_config::{load_config, DiagnosticsConfig};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Where in a query an error was detected
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// The full query text
    pub text: &'a str,
    /// 0-based char offset into `text`, or `None` when no position is known
    pub offset: Option<usize>,
    /// Optional label for the surrounding construct
    pub label: Option<&'a Label>,
}

impl<'a> ErrorContext<'a> {
    #[must_use]
    pub const fn new(text: &'a str, offset: usize) -> Self {
        Self {
            text,
            offset: Some(offset),
            label: None,
        }
    }

    #[must_use]
    pub const fn without_position(text: &'a str) -> Self {
        Self {
            text,
            offset: None,
            label: None,
        }
    }

    #[must_use]
    pub const fn with_label(mut self, label: &'a Label) -> Self {
        self.label = Some(label);
        self
    }
}

/// Builds located [`QueryError`]s.
///
/// Holds the lexer's line terminators, the display phrases and the resource
/// table used for keyed labels. Immutable once built, so one instance can be
/// shared by every compilation thread.
#[derive(Clone)]
pub struct DiagnosticFormatter {
    phrases: Phrases,
    terminators: LineTerminators,
    resources: Arc<dyn ResourceLookup>,
}

impl DiagnosticFormatter {
    /// English phrases, default line terminators, no resources
    #[must_use]
    pub fn new() -> Self {
        Self {
            phrases: Phrases::default(),
            terminators: LineTerminators::default(),
            resources: Arc::new(NoResources),
        }
    }

    #[must_use]
    pub fn with_phrases(mut self, phrases: Phrases) -> Self {
        self.phrases = phrases;
        self
    }

    #[must_use]
    pub fn with_line_terminators(mut self, terminators: LineTerminators) -> Self {
        self.terminators = terminators;
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Arc<dyn ResourceLookup>) -> Self {
        self.resources = resources;
        self
    }

    /// Build a formatter from a loaded config, optionally selecting a locale.
    ///
    /// Phrases come from the resource table first (`querydiag.near`, ...),
    /// then from the `phrases` sections, then the English defaults.
    pub fn from_config(config: &DiagnosticsConfig, locale: Option<&str>) -> Result<Self> {
        if let Some(name) = locale {
            if config.locale(name).is_none() {
                return Err(DiagnosticsError::UnknownLocale {
                    name: name.to_string(),
                    available: config.locale_names().join(", "),
                });
            }
        }

        let table = StringTable::from(config.effective_strings(locale));
        let overrides = config.effective_phrases(locale);
        let defaults = Phrases::default();
        let pick = |key: &str, configured: Option<String>, default: String| {
            table
                .lookup(key)
                .filter(|value| !value.trim().is_empty())
                .or(configured)
                .unwrap_or(default)
        };
        let phrases = Phrases {
            near: pick(Phrases::NEAR_KEY, overrides.near, defaults.near),
            line: pick(Phrases::LINE_KEY, overrides.line, defaults.line),
            column: pick(Phrases::COLUMN_KEY, overrides.column, defaults.column),
        };

        let terminators = match config.line_terminators {
            Some(ref entries) => LineTerminators::new(
                entries
                    .iter()
                    .map(String::as_str)
                    .map(single_char)
                    .collect::<Result<Vec<_>>>()?,
            ),
            None => LineTerminators::default(),
        };

        tracing::debug!(
            locale = locale.unwrap_or("default"),
            strings = table.len(),
            terminators = terminators.as_slice().len(),
            "Built diagnostic formatter from config"
        );

        Ok(Self {
            phrases,
            terminators,
            resources: Arc::new(table),
        })
    }

    /// Load a config file and build a formatter from it
    pub fn from_config_file(path: &Path, locale: Option<&str>) -> Result<Self> {
        let config = load_config(path)?;
        Self::from_config(&config, locale)
    }

    #[must_use]
    pub fn phrases(&self) -> &Phrases {
        &self.phrases
    }

    #[must_use]
    pub fn line_terminators(&self) -> &LineTerminators {
        &self.terminators
    }

    /// Normalize query text with this formatter's line terminators
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.terminators)
    }

    /// Resolve a label against this formatter's resource table
    #[must_use]
    pub fn resolve_label(&self, label: &Label) -> Option<String> {
        label.resolve(self.resources.as_ref())
    }

    /// Locate the error described by `ctx` and build a [`QueryError`] for it.
    ///
    /// # Panics
    ///
    /// Panics if `ctx.offset` is greater than the number of chars in
    /// `ctx.text`. Offsets come from the parser's own bookkeeping, so an
    /// out-of-range offset is a bug in the caller.
    #[must_use]
    pub fn create_from_context(
        &self,
        ctx: ErrorContext<'_>,
        description: impl Into<String>,
        cause: Option<BoxError>,
    ) -> QueryError {
        let description = description.into();

        let position = ctx.offset.map(|offset| {
            let text_len = ctx.text.chars().count();
            assert!(
                offset <= text_len,
                "error offset {offset} is past the end of the query text ({text_len} chars)"
            );

            let normalized = self.normalize(ctx.text);
            LineIndex::with_source_len(&normalized, text_len).resolve(offset)
        });

        let label = ctx.label.and_then(|label| self.resolve_label(label));
        let context_phrase = format_context(label.as_deref(), position, &self.phrases);
        let message = format_message(&description, &context_phrase, &self.phrases);

        tracing::debug!(
            offset = ?ctx.offset,
            line = position.map_or(0, |p| p.line),
            column = position.map_or(0, |p| p.column),
            "Located query error"
        );

        let state = DiagnosticState::new(
            description,
            context_phrase,
            position.map_or(0, |p| p.line),
            position.map_or(0, |p| p.column),
        );

        QueryError::from_parts(message, state, cause)
    }

    /// Build a [`QueryError`] without any location data
    #[must_use]
    pub fn create_simple(&self, message: impl Into<String>, cause: Option<BoxError>) -> QueryError {
        QueryError::simple(message, cause)
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DiagnosticFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticFormatter")
            .field("phrases", &self.phrases)
            .field("terminators", &self.terminators)
            .finish_non_exhaustive()
    }
}

fn single_char(entry: &str) -> Result<char> {
    let mut chars = entry.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(DiagnosticsError::InvalidLineTerminator(entry.to_string())),
    }
}
