//! Error location and message formatting for query compilers.
//!
//! Given the query text and the char offset where the parser detected a
//! problem, [`DiagnosticFormatter`] resolves a 1-based line and column and
//! builds a [`QueryError`] whose message reads
//! `"<description> near [<label>, ]line L, column C."`.

mod context;
mod diagnostics;
mod error;
mod formatter;
mod message;
mod normalize;
mod position;
mod resources;

pub use context::{format_context, Label};
pub use diagnostics::{DiagnosticSnapshot, DiagnosticState};
pub use error::{BoxError, DiagnosticsError, QueryError, Result, SnapshotError};
pub use formatter::{DiagnosticFormatter, ErrorContext};
pub use message::format_message;
pub use normalize::{normalize, LineTerminators};
pub use position::{resolve, LineIndex, Position};
pub use resources::{NoResources, Phrases, ResourceLookup, StringTable};

// Re-export config types used by `DiagnosticFormatter::from_config`
pub use querydiag_config::{DiagnosticsConfig, LocaleConfig, PhrasesConfig};
