//! Tapback translation.
//!
//! Reaction lines read like `Loved by Me` or `Laughed at by +15551234567`.
//! The leading verb decides the glyph; who reacted is dropped.

use std::borrow::Cow;

pub const HEART: &str = "\u{2764}\u{fe0f}";
pub const LAUGHING: &str = "\u{1f602}";
pub const THUMBS_UP: &str = "\u{1f44d}";
pub const THUMBS_DOWN: &str = "\u{1f44e}";
pub const DOUBLE_EXCLAMATION: &str = "\u{203c}\u{fe0f}";
pub const QUESTION: &str = "\u{2753}";

/// Verb prefix to glyph. Longer forms come first; synonyms share a glyph.
const TAPBACK_GLYPHS: &[(&str, &str)] = &[
    ("loved", HEART),
    ("love", HEART),
    ("laughed", LAUGHING),
    ("laugh", LAUGHING),
    ("liked", THUMBS_UP),
    ("like", THUMBS_UP),
    ("disliked", THUMBS_DOWN),
    ("dislike", THUMBS_DOWN),
    ("emphasized", DOUBLE_EXCLAMATION),
    ("emphasize", DOUBLE_EXCLAMATION),
    ("questioned", QUESTION),
    ("question", QUESTION),
];

/// Translates one reaction line.
///
/// The line is matched case-insensitively against the verb table by prefix.
/// Lines that start with no known verb come back unchanged, original casing
/// included.
///
/// ```
/// use greetpack::parsing::translate_tapback;
///
/// assert_eq!(translate_tapback("Loved by Me"), "❤️");
/// assert_eq!(translate_tapback("Laughed at by +15551234567"), "😂");
/// assert_eq!(translate_tapback("Reacted 🔥 to a message"), "Reacted 🔥 to a message");
/// ```
pub fn translate_tapback(raw: &str) -> Cow<'_, str> {
    let lower = raw.to_lowercase();

    TAPBACK_GLYPHS
        .iter()
        .find(|(verb, _)| lower.starts_with(verb))
        .map_or(Cow::Borrowed(raw), |(_, glyph)| Cow::Borrowed(*glyph))
}

/// Translates a message's reaction lines and joins them with single spaces.
///
/// Returns `None` when there are no reactions at all, so an empty block
/// never turns into an empty string.
///
/// ```
/// use greetpack::parsing::translate_tapbacks;
///
/// assert_eq!(
///     translate_tapbacks(&["Loved by Me", "Emphasized by +15551234567"]).as_deref(),
///     Some("❤️ ‼️")
/// );
/// assert_eq!(translate_tapbacks::<&str>(&[]), None);
/// ```
pub fn translate_tapbacks<S: AsRef<str>>(tapbacks: &[S]) -> Option<String> {
    if tapbacks.is_empty() {
        return None;
    }

    let glyphs: Vec<Cow<'_, str>> = tapbacks
        .iter()
        .map(|t| translate_tapback(t.as_ref()))
        .collect();
    Some(glyphs.join(" "))
}
