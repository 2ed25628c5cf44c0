//! Greeting detection.
//!
//! A message is a greeting when it is short and its lowercase text contains
//! one of the greeting phrases. Matching is plain substring containment:
//! no word boundaries, no punctuation stripping.
//!
//! ```
//! use greetpack::parsing::GreetingFilter;
//!
//! let filter = GreetingFilter::default();
//!
//! assert!(filter.accepts("Good morning!"));
//! assert!(filter.accepts("GOODMORNING sunshine"));
//! assert!(!filter.accepts("Morning!"));
//! assert!(!filter.accepts("Good morning, hope you have the best day today and beyond!!"));
//! ```

use crate::config::ParserConfig;

/// Decides whether assembled message text counts as a greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingFilter {
    max_length: usize,
    phrases: Vec<String>,
}

impl Default for GreetingFilter {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}

impl GreetingFilter {
    /// Creates a filter. Phrases are lowercased.
    pub fn new<I, S>(max_length: usize, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            max_length,
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.max_length, &config.phrases)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Returns `true` if `text` is non-empty, at most `max_length` UTF-16
    /// code units long, and contains a greeting phrase once lowercased.
    ///
    /// Emoji outside the Basic Multilingual Plane count as two units. `text`
    /// may span several lines; the line breaks count toward the length.
    pub fn accepts(&self, text: &str) -> bool {
        if text.is_empty() || text.encode_utf16().count() > self.max_length {
            return false;
        }

        let lower = text.to_lowercase();
        self.phrases.iter().any(|phrase| lower.contains(phrase.as_str()))
    }
}
