/// The set of characters the query lexer treats as line breaks.
///
/// This is a lexical-grammar constant owned by the parser; the formatter only
/// consumes it. Every member is rewritten to `'\n'` by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTerminators {
    chars: Vec<char>,
}

impl LineTerminators {
    /// Line feed, next line, line separator and paragraph separator.
    pub const DEFAULT: &'static [char] = &['\n', '\u{0085}', '\u{2028}', '\u{2029}'];

    /// Build a terminator set from the given characters.
    ///
    /// `'\n'` is always a member, whether or not it is listed.
    #[must_use]
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut set = vec!['\n'];
        for ch in chars {
            if !set.contains(&ch) {
                set.push(ch);
            }
        }
        Self { chars: set }
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl Default for LineTerminators {
    fn default() -> Self {
        Self::new(Self::DEFAULT.iter().copied())
    }
}

/// Rewrite query text into a display-safe form.
///
/// - lexer line terminators become `'\n'`
/// - any other control or whitespace character becomes `' '`, except `'\r'`,
///   which is kept
/// - trailing `'\n'` characters are trimmed
///
/// Apart from the trailing trim the output has exactly one char per input
/// char, so char offsets into the input stay valid against the output.
#[must_use]
pub fn normalize(text: &str, terminators: &LineTerminators) -> String {
    let mut normalized: String = text
        .chars()
        .map(|ch| {
            if terminators.contains(ch) {
                '\n'
            } else if ch != '\r' && (ch.is_control() || ch.is_whitespace()) {
                ' '
            } else {
                ch
            }
        })
        .collect();

    let trimmed_len = normalized.trim_end_matches('\n').len();
    normalized.truncate(trimmed_len);

    tracing::trace!(
        input_chars = text.chars().count(),
        output_chars = normalized.chars().count(),
        "Normalized query text"
    );

    normalized
}
