//! Configuration types for the greeting parser.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`SenderTable`] - who is who in the conversation
//! - [`ParserConfig`] - everything the parser needs to know about an export
//!
//! # Example
//!
//! ```rust
//! use greetpack::config::{ParserConfig, SenderTable};
//! use greetpack::GreetingParser;
//!
//! let config = ParserConfig::new()
//!     .with_senders(SenderTable::new("Me", "ana", "leo"))
//!     .with_max_length(60);
//!
//! let parser = GreetingParser::with_config(config)?;
//! # Ok::<(), greetpack::GreetpackError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GreetpackError, Result};
use crate::message::Sender;

/// Two-entry identity lookup for a one-on-one conversation.
///
/// Exports label the owner's own messages with a fixed token (`Me` on
/// iOS) and the other participant's messages with a phone number. The
/// table maps both onto the short tags used in the output document.
///
/// # Example
///
/// ```rust
/// use greetpack::config::SenderTable;
/// use greetpack::Sender;
///
/// let table = SenderTable::default();
/// assert_eq!(table.resolve("Me"), Some(Sender::Owner));
/// assert_eq!(table.resolve("+15551234567"), Some(Sender::Counterpart));
/// assert_eq!(table.resolve("Hello"), None);
/// assert_eq!(table.tag(Sender::Owner), "ry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderTable {
    /// Line that marks the owner's messages (default: `Me`)
    pub owner_label: String,

    /// Tag written for the owner's messages (default: `ry`)
    pub owner_tag: String,

    /// Tag written for the counterpart's messages (default: `bb`)
    pub counterpart_tag: String,
}

impl Default for SenderTable {
    fn default() -> Self {
        Self {
            owner_label: "Me".to_string(),
            owner_tag: "ry".to_string(),
            counterpart_tag: "bb".to_string(),
        }
    }
}

impl SenderTable {
    /// Creates a table from the owner's label and the two output tags.
    pub fn new(
        owner_label: impl Into<String>,
        owner_tag: impl Into<String>,
        counterpart_tag: impl Into<String>,
    ) -> Self {
        Self {
            owner_label: owner_label.into(),
            owner_tag: owner_tag.into(),
            counterpart_tag: counterpart_tag.into(),
        }
    }

    /// Sets the owner's label.
    #[must_use]
    pub fn with_owner_label(mut self, label: impl Into<String>) -> Self {
        self.owner_label = label.into();
        self
    }

    /// Sets the owner's output tag.
    #[must_use]
    pub fn with_owner_tag(mut self, tag: impl Into<String>) -> Self {
        self.owner_tag = tag.into();
        self
    }

    /// Sets the counterpart's output tag.
    #[must_use]
    pub fn with_counterpart_tag(mut self, tag: impl Into<String>) -> Self {
        self.counterpart_tag = tag.into();
        self
    }

    /// Maps a trimmed line to a sender, if it is a sender marker.
    ///
    /// The owner label must match exactly. Any `+` followed by one or more
    /// ASCII digits is the counterpart.
    pub fn resolve(&self, line: &str) -> Option<Sender> {
        if line == self.owner_label {
            Some(Sender::Owner)
        } else if is_phone_number(line) {
            Some(Sender::Counterpart)
        } else {
            None
        }
    }

    /// Returns the output tag for a sender.
    pub fn tag(&self, sender: Sender) -> &str {
        match sender {
            Sender::Owner => &self.owner_tag,
            Sender::Counterpart => &self.counterpart_tag,
        }
    }

    /// Checks the table for values that would make the output ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.owner_label.trim().is_empty() {
            return Err(GreetpackError::invalid_config(
                "owner label must not be empty",
            ));
        }
        if self.owner_label.trim() != self.owner_label {
            return Err(GreetpackError::invalid_config(format!(
                "owner label '{}' has surrounding whitespace and can never match a trimmed line",
                self.owner_label
            )));
        }
        if is_phone_number(&self.owner_label) {
            return Err(GreetpackError::invalid_config(format!(
                "owner label '{}' looks like a phone number",
                self.owner_label
            )));
        }
        if self.owner_tag.is_empty() || self.counterpart_tag.is_empty() {
            return Err(GreetpackError::invalid_config("sender tags must not be empty"));
        }
        if self.owner_tag == self.counterpart_tag {
            return Err(GreetpackError::invalid_config(format!(
                "owner and counterpart share the tag '{}'",
                self.owner_tag
            )));
        }
        Ok(())
    }
}

/// `+` followed by digits only.
fn is_phone_number(line: &str) -> bool {
    line.strip_prefix('+')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Configuration for parsing a text-message export.
///
/// # Example
///
/// ```rust
/// use greetpack::config::ParserConfig;
///
/// let config = ParserConfig::new()
///     .with_tapback_marker("Reactions:")
///     .with_phrases(["good morning", "goodmorning", "gm"]);
///
/// assert_eq!(config.max_length, 40);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Sender identity lookup
    pub senders: SenderTable,

    /// Line that opens a reaction block (default: `Tapbacks:`)
    pub tapback_marker: String,

    /// Longest message, in UTF-16 code units, still considered a greeting (default: 40)
    pub max_length: usize,

    /// Lowercase phrases, any of which makes a message a greeting
    pub phrases: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            senders: SenderTable::default(),
            tapback_marker: "Tapbacks:".to_string(),
            max_length: 40,
            phrases: vec!["good morning".to_string(), "goodmorning".to_string()],
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the sender table.
    #[must_use]
    pub fn with_senders(mut self, senders: SenderTable) -> Self {
        self.senders = senders;
        self
    }

    /// Sets the line that opens a reaction block.
    #[must_use]
    pub fn with_tapback_marker(mut self, marker: impl Into<String>) -> Self {
        self.tapback_marker = marker.into();
        self
    }

    /// Sets the maximum greeting length.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Replaces the greeting phrases. Phrases are lowercased.
    #[must_use]
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases
            .into_iter()
            .map(|p| p.into().to_lowercase())
            .collect();
        self
    }

    /// Checks that the configuration can be used for parsing.
    pub fn validate(&self) -> Result<()> {
        self.senders.validate()?;

        if self.tapback_marker.trim().is_empty() {
            return Err(GreetpackError::invalid_config(
                "tapback marker must not be empty",
            ));
        }
        if self.tapback_marker == self.senders.owner_label {
            return Err(GreetpackError::invalid_config(
                "tapback marker and owner label must differ",
            ));
        }
        if self.max_length == 0 {
            return Err(GreetpackError::invalid_config(
                "max length must be greater than zero",
            ));
        }
        if self.phrases.is_empty() {
            return Err(GreetpackError::invalid_config(
                "at least one greeting phrase is required",
            ));
        }
        if self.phrases.iter().any(|p| p.is_empty()) {
            return Err(GreetpackError::invalid_config(
                "greeting phrases must not be empty",
            ));
        }
        Ok(())
    }
}
