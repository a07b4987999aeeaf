use crate::{Position, SnapshotError};
use serde::{Deserialize, Serialize};

/// Location data attached to a raised [`QueryError`](crate::QueryError).
///
/// Missing values are `""` and `0`, never `None`. A line or column of 0 means
/// "no position", since real positions start at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticState {
    description: String,
    context_phrase: String,
    line: usize,
    column: usize,
}

impl DiagnosticState {
    /// Rebuild a state from its four fields. Nothing is recomputed.
    pub fn new(
        description: impl Into<String>,
        context_phrase: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            description: description.into(),
            context_phrase: context_phrase.into(),
            line,
            column,
        }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn context_phrase(&self) -> &str {
        &self.context_phrase
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The resolved position, if one was recorded
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        if self.line == 0 || self.column == 0 {
            None
        } else {
            Some(Position::new(self.line, self.column))
        }
    }
}

/// Plain-data copy of a raised error, for crossing process or storage
/// boundaries.
///
/// Fields (serialized in camelCase):
///
/// | field           | type   | meaning                                   |
/// |-----------------|--------|-------------------------------------------|
/// | `version`       | u32    | layout version, currently `1`             |
/// | `message`       | string | the full formatted message                |
/// | `description`   | string | the error description without location    |
/// | `contextPhrase` | string | `"[label, ]line L, column C"` or `""`     |
/// | `line`          | usize  | 1-based line, 0 when unknown              |
/// | `column`        | usize  | 1-based column, 0 when unknown            |
///
/// The causing error is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSnapshot {
    pub version: u32,
    pub message: String,
    #[serde(flatten)]
    pub state: DiagnosticState,
}

impl DiagnosticSnapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(message: impl Into<String>, state: DiagnosticState) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            message: message.into(),
            state,
        }
    }

    /// Fail if the snapshot was written with a layout this build cannot read
    pub fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version == Self::CURRENT_VERSION {
            Ok(())
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: Self::CURRENT_VERSION,
            })
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.check_version()?;
        Ok(snapshot)
    }
}
