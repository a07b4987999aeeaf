use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in query text (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in chars)
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Offset-to-position conversion over normalized query text.
///
/// Lines are the segments between `'\n'` characters, empty segments
/// included. Lengths and offsets are counted in chars, not bytes.
///
/// # Example
///
/// ```
/// use querydiag::{LineIndex, Position};
///
/// let index = LineIndex::new("SELECT *\nFROM X\nWHERE Y = 1");
///
/// assert_eq!(index.resolve(14), Position::new(2, 6));
/// assert_eq!(index.offset_of(Position::new(2, 6)), Some(14));
/// ```
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Length of each line in chars, not counting the separator
    line_lengths: Vec<usize>,
    /// Length in chars of the text offsets are taken from. At least the
    /// indexed length; larger when normalization trimmed trailing line feeds.
    source_len: usize,
}

impl LineIndex {
    /// Build a line index from normalized text.
    ///
    /// Offsets are bounded by the length of `normalized` itself.
    #[must_use]
    pub fn new(normalized: &str) -> Self {
        let line_lengths: Vec<usize> = normalized
            .split('\n')
            .map(|line| line.chars().count())
            .collect();
        let source_len = line_lengths.iter().sum::<usize>() + line_lengths.len() - 1;

        Self {
            line_lengths,
            source_len,
        }
    }

    /// Build a line index from normalized text whose offsets refer to a
    /// source of `source_len` chars (the text before normalization).
    ///
    /// # Panics
    ///
    /// Panics if `source_len` is shorter than `normalized`.
    #[must_use]
    pub fn with_source_len(normalized: &str, source_len: usize) -> Self {
        let mut index = Self::new(normalized);
        assert!(
            source_len >= index.source_len,
            "source length {source_len} is shorter than the normalized text ({} chars)",
            index.source_len
        );
        index.source_len = source_len;
        index
    }

    /// Convert a 0-based char offset to a 1-based position.
    ///
    /// Walks the lines in order, subtracting each full line (plus its
    /// separator) from the offset until the remainder fits in the current
    /// line. An offset equal to the text length lands just past the last
    /// char. Offsets past the end of the indexed text (for example into
    /// trailing line feeds removed by normalization) resolve to the line
    /// after the last one.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than the source length. Offsets come
    /// from the parser's own bookkeeping, so that is a bug in the caller.
    #[must_use]
    pub fn resolve(&self, offset: usize) -> Position {
        assert!(
            offset <= self.source_len,
            "offset {offset} is past the end of the text ({} chars)",
            self.source_len
        );

        let mut column = offset;
        let mut line_index = 0;

        while line_index < self.line_lengths.len() && column > self.line_lengths[line_index] {
            column -= self.line_lengths[line_index] + 1;
            line_index += 1;
        }

        Position {
            line: line_index + 1,
            column: column + 1,
        }
    }

    /// Convert a 1-based position back to a 0-based char offset.
    ///
    /// Returns `None` for positions `resolve` never produces: a zero line or
    /// column, a column more than one past the end of its line, a line more
    /// than one past the end of the index, or anything past the source length.
    #[must_use]
    pub fn offset_of(&self, position: Position) -> Option<usize> {
        if position.line == 0 || position.column == 0 {
            return None;
        }

        if let Some(&len) = self.line_lengths.get(position.line - 1) {
            if position.column > len + 1 {
                return None;
            }
        }

        let preceding: usize = self
            .line_lengths
            .get(..position.line - 1)?
            .iter()
            .map(|len| len + 1)
            .sum();

        Some(preceding + position.column - 1).filter(|&offset| offset <= self.source_len)
    }

    /// Get the number of lines in the indexed text
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_lengths.len()
    }

    /// Get the length of a 0-indexed line in chars
    #[must_use]
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line_lengths.get(line).copied()
    }

    /// Total length of the indexed text in chars
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.line_lengths.iter().sum::<usize>() + self.line_lengths.len() - 1
    }

    /// Largest offset accepted by [`LineIndex::resolve`]
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_len
    }
}

/// Resolve an offset in normalized text to a 1-based position.
///
/// Shorthand for building a [`LineIndex`] and resolving a single offset.
///
/// # Panics
///
/// Panics if `offset` is greater than the length of `normalized`.
#[must_use]
pub fn resolve(normalized: &str, offset: usize) -> Position {
    LineIndex::new(normalized).resolve(offset)
}
