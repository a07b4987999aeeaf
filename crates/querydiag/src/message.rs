use crate::Phrases;

/// Compose the final error message.
///
/// `"<description>."` when the context phrase is empty, otherwise
/// `"<description> <near> <context>."`.
#[must_use]
pub fn format_message(description: &str, context_phrase: &str, phrases: &Phrases) -> String {
    if context_phrase.is_empty() {
        format!("{description}.")
    } else {
        format!("{description} {} {context_phrase}.", phrases.near)
    }
}
