//! Output record type for a single greeting.
//!
//! [`GreetingRecord`] is the compact shape the calendar display binds to:
//!
//! ```json
//! {"ts": 1704456060000, "msg": "Good morning!", "react": "❤️", "sender": "ry"}
//! ```
//!
//! Field names are part of the output contract and must not change.

use serde::{Deserialize, Serialize};

/// Which side of a one-on-one conversation wrote a message.
///
/// The textual tag written to the output is looked up in a
/// [`SenderTable`](crate::config::SenderTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person who exported the conversation
    Owner,
    /// The other participant
    Counterpart,
}

/// A greeting extracted from the export.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `ts` | `i64` | Send time, epoch milliseconds |
/// | `msg` | `String` | Message text, first line break collapsed to a space |
/// | `react` | `Option<String>` | Space-separated reaction glyphs, `null` when none |
/// | `sender` | `String` | Sender tag from the sender table |
///
/// # Example
///
/// ```
/// use greetpack::GreetingRecord;
///
/// let record = GreetingRecord::new(1704456060000, "Good morning!", "ry").with_react("❤️");
/// let json = serde_json::to_string(&record)?;
///
/// assert_eq!(
///     json,
///     r#"{"ts":1704456060000,"msg":"Good morning!","react":"❤️","sender":"ry"}"#
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingRecord {
    /// Send time in epoch milliseconds.
    pub ts: i64,

    /// Message text.
    pub msg: String,

    /// Reaction glyphs joined with single spaces.
    ///
    /// Serialized as `null` rather than omitted; the display checks for it.
    #[serde(default)]
    pub react: Option<String>,

    /// Sender tag.
    pub sender: String,
}

impl GreetingRecord {
    /// Creates a record without reactions.
    pub fn new(ts: i64, msg: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            ts,
            msg: msg.into(),
            react: None,
            sender: sender.into(),
        }
    }

    /// Builder-style method to set the reaction string.
    #[must_use]
    pub fn with_react(mut self, react: impl Into<String>) -> Self {
        self.react = Some(react.into());
        self
    }

    /// Returns `true` if anyone reacted to this greeting.
    pub fn has_react(&self) -> bool {
        self.react.is_some()
    }
}
