//! # Greetpack
//!
//! A Rust library for pulling "good morning" greetings out of a text-message
//! export and grouping them by day for a calendar-style display.
//!
//! ## Overview
//!
//! The export is a flat, line-oriented dump of a one-on-one conversation:
//! a timestamp line opens each message, a sender line says who wrote it,
//! content lines follow, and an optional `Tapbacks:` block lists reactions.
//! Greetpack:
//!
//! 1. tags every line ([`parsing::classifier`])
//! 2. assembles messages in a single pass ([`parser::MessageAssembler`])
//! 3. keeps short messages containing a greeting ([`parsing::filter`])
//! 4. turns reactions into emoji ([`parsing::reactions`])
//! 5. buckets the results by day ([`calendar`])
//!
//! ## Quick Start
//!
//! ```rust
//! use greetpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "\
//! Jan 5, 2024 7:01:00 AM
//! Me
//! Good morning!
//! Tapbacks:
//! Loved by +15551234567
//! ";
//!
//!     let records = parse(export)?;
//!     let doc = group(records, "raw-messages.txt");
//!
//!     assert_eq!(doc.total_messages, 1);
//!     assert_eq!(doc.dates.len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`GreetingParser`], [`parse`], the assembler state machine
//! - [`parsing`] - line classifier, greeting filter, reaction translator
//! - [`calendar`] - [`CalendarDocument`], [`DateGrouper`](calendar::DateGrouper), [`group`]
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`SenderTable`](config::SenderTable)
//! - [`message`] - [`GreetingRecord`], [`Sender`]
//! - [`output`] - JSON writer (requires `json-output`)
//! - [`cli`] - clap arguments (requires `cli`)
//! - [`error`] - [`GreetpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod calendar;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod message;
#[cfg(feature = "json-output")]
pub mod output;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use calendar::{CalendarDocument, group};
pub use error::{GreetpackError, Result};
pub use message::{GreetingRecord, Sender};
pub use parser::{GreetingParser, parse};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use greetpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{GreetingRecord, Sender};

    pub use crate::error::{GreetpackError, Result};

    pub use crate::config::{ParserConfig, SenderTable};

    pub use crate::parser::{GreetingParser, parse};

    pub use crate::calendar::{CalendarDocument, DateGrouper, ProcessingSummary, group};

    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, write_json};
}
