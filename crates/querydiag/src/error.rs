use crate::{DiagnosticSnapshot, DiagnosticState, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiagnosticsError>;

/// A causing error carried along with a [`QueryError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while building a formatter from configuration
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("Configuration error: {0}")]
    Config(#[from] querydiag_config::ConfigError),

    #[error("Unknown locale '{name}' (available: {available})")]
    UnknownLocale { name: String, available: String },

    #[error("Invalid line terminator {0:?}: expected a single character")]
    InvalidLineTerminator(String),
}

/// Failures while restoring a [`DiagnosticSnapshot`]
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A located query error.
///
/// `Display` yields the formatted message, e.g.
/// `"unexpected token near WHERE clause, line 3, column 7."`. The structured
/// parts stay available through the accessors.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct QueryError {
    message: String,
    state: DiagnosticState,
    #[source]
    cause: Option<BoxError>,
}

impl QueryError {
    /// Build an error without any location data.
    ///
    /// The state fields are left empty; `message` is used as is and must not
    /// be empty. Debug builds panic on an empty message.
    pub fn simple(message: impl Into<String>, cause: Option<BoxError>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "query error message must not be empty");
        Self::from_parts(message, DiagnosticState::default(), cause)
    }

    /// Assemble an error from an already formatted message and its state
    pub fn from_parts(
        message: impl Into<String>,
        state: DiagnosticState,
        cause: Option<BoxError>,
    ) -> Self {
        Self {
            message: message.into(),
            state,
            cause,
        }
    }

    /// Restore an error captured with [`QueryError::snapshot`].
    ///
    /// The restored error has no cause.
    pub fn from_snapshot(snapshot: DiagnosticSnapshot) -> std::result::Result<Self, SnapshotError> {
        snapshot.check_version()?;
        Ok(Self::from_parts(snapshot.message, snapshot.state, None))
    }

    #[must_use]
    pub fn snapshot(&self) -> DiagnosticSnapshot {
        DiagnosticSnapshot::new(self.message.clone(), self.state.clone())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.state.description()
    }

    #[must_use]
    pub fn context_phrase(&self) -> &str {
        self.state.context_phrase()
    }

    /// 1-based line, or 0 when the error has no position
    #[must_use]
    pub const fn line(&self) -> usize {
        self.state.line()
    }

    /// 1-based column, or 0 when the error has no position
    #[must_use]
    pub const fn column(&self) -> usize {
        self.state.column()
    }

    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.state.position()
    }

    #[must_use]
    pub const fn state(&self) -> &DiagnosticState {
        &self.state
    }

    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}
