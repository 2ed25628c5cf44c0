//! Greeting extraction from a text-message export.
//!
//! Parsing is a single pass over the non-blank, trimmed lines of the export.
//! [`MessageAssembler`] keeps at most one message in progress and finishes it
//! when the next timestamp header arrives or the input ends. Finished
//! messages that pass the [`GreetingFilter`] become [`GreetingRecord`]s, in
//! the order they appear in the export.
//!
//! # Example
//!
//! ```rust
//! use greetpack::parser::parse;
//!
//! let export = "\
//! Jan 5, 2024 7:01:00 AM
//! Me
//! Good morning!
//! Tapbacks:
//! Loved by +15551234567
//! ";
//!
//! let records = parse(export)?;
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].msg, "Good morning!");
//! assert_eq!(records[0].sender, "ry");
//! assert_eq!(records[0].react.as_deref(), Some("❤️"));
//! # Ok::<(), greetpack::GreetpackError>(())
//! ```
//!
//! # Time zones
//!
//! Header times are wall-clock times. [`GreetingParser::new`] reads them in
//! the machine's local zone; [`GreetingParser::with_timezone`] takes any
//! [`chrono::TimeZone`], which keeps results reproducible in tests.

use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use tracing::{debug, info};

use crate::config::{ParserConfig, SenderTable};
use crate::error::{GreetpackError, Result};
use crate::message::{GreetingRecord, Sender};
use crate::parsing::{GreetingFilter, LineClassifier, LineKind, translate_tapbacks};

/// Assembler mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Lines are headers, sender markers, or message content
    #[default]
    Scanning,
    /// Lines are reactions until the next header or sender marker
    InTapbacks,
}

/// A message whose lines are still being collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    /// Send time, epoch milliseconds
    pub ts: i64,
    /// Content lines joined with `\n`
    pub content: String,
    /// Most recent sender marker, if any
    pub sender: Option<Sender>,
    /// Raw reaction lines, in order
    pub tapbacks: Vec<String>,
}

impl PendingMessage {
    pub fn new(ts: i64) -> Self {
        Self {
            ts,
            content: String::new(),
            sender: None,
            tapbacks: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        self.content.push_str(line);
    }
}

/// Shapes a finished message into an output record.
///
/// Only the first line break is collapsed to a space, so the common
/// two-line greeting reads as one line while longer messages keep the rest
/// of their breaks. Returns `None` if the message never got a sender.
pub fn build_record(pending: PendingMessage, senders: &SenderTable) -> Option<GreetingRecord> {
    let sender = pending.sender?;

    Some(GreetingRecord {
        ts: pending.ts,
        msg: pending.content.replacen('\n', " ", 1),
        react: translate_tapbacks(&pending.tapbacks),
        sender: senders.tag(sender).to_string(),
    })
}

/// Line-by-line state machine that turns an export into greeting records.
///
/// ```rust
/// use chrono::Utc;
/// use greetpack::config::ParserConfig;
/// use greetpack::parser::{MessageAssembler, ScanState};
/// use greetpack::parsing::GreetingFilter;
///
/// let config = ParserConfig::default();
/// let filter = GreetingFilter::from_config(&config);
/// let mut assembler = MessageAssembler::new(&config, &filter, &Utc);
///
/// assembler.feed("Jan 5, 2024 7:01:00 AM")?;
/// assembler.feed("Me")?;
/// assembler.feed("good morning")?;
/// assembler.feed("Tapbacks:")?;
/// assert_eq!(assembler.state(), ScanState::InTapbacks);
///
/// let records = assembler.finish();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].react, None);
/// # Ok::<(), greetpack::GreetpackError>(())
/// ```
#[derive(Debug)]
pub struct MessageAssembler<'c, Tz: TimeZone> {
    classifier: LineClassifier<'c>,
    senders: &'c SenderTable,
    filter: &'c GreetingFilter,
    tz: &'c Tz,
    state: ScanState,
    current: Option<PendingMessage>,
    output: Vec<GreetingRecord>,
    lines_seen: usize,
}

impl<'c, Tz: TimeZone> MessageAssembler<'c, Tz> {
    pub fn new(config: &'c ParserConfig, filter: &'c GreetingFilter, tz: &'c Tz) -> Self {
        Self {
            classifier: LineClassifier::new(&config.senders, &config.tapback_marker),
            senders: &config.senders,
            filter,
            tz,
            state: ScanState::Scanning,
            current: None,
            output: Vec::new(),
            lines_seen: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// The message being collected, if a header has been seen.
    pub fn current(&self) -> Option<&PendingMessage> {
        self.current.as_ref()
    }

    /// Records finished so far.
    pub fn records(&self) -> &[GreetingRecord] {
        &self.output
    }

    /// Consumes the next physical line of the export.
    ///
    /// Surrounding whitespace and a byte-order mark are trimmed; blank lines
    /// only advance the line count used in error reports. Fails only when a
    /// timestamp header names no real instant.
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.lines_seen += 1;

        let line = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if line.is_empty() {
            return Ok(());
        }

        match (self.state, self.classifier.classify(line)) {
            (_, LineKind::Timestamp(header)) => {
                self.finalize();
                let ts = header.to_millis(self.tz).map_err(|reason| {
                    GreetpackError::invalid_timestamp(self.lines_seen, line, reason)
                })?;
                self.current = Some(PendingMessage::new(ts));
                self.state = ScanState::Scanning;
            }
            (_, LineKind::Sender(sender)) => {
                if let Some(current) = self.current.as_mut() {
                    current.sender = Some(sender);
                }
                self.state = ScanState::Scanning;
            }
            (ScanState::Scanning, LineKind::TapbackStart) => {
                self.state = ScanState::InTapbacks;
            }
            (ScanState::InTapbacks, LineKind::TapbackStart | LineKind::Content(_)) => {
                if let Some(current) = self.current.as_mut() {
                    current.tapbacks.push(line.to_string());
                }
            }
            (ScanState::Scanning, LineKind::Content(text)) => match self.current.as_mut() {
                Some(current) if current.sender.is_some() => current.push_line(text),
                Some(_) => debug!(line = self.lines_seen, "dropping content before any sender"),
                None => debug!(line = self.lines_seen, "dropping content before any header"),
            },
        }

        Ok(())
    }

    /// Finishes the last message and returns every record, in input order.
    pub fn finish(mut self) -> Vec<GreetingRecord> {
        self.finalize();
        self.output
    }

    fn finalize(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };

        if !self.filter.accepts(&pending.content) {
            debug!(ts = pending.ts, "message is not a greeting");
            return;
        }

        if let Some(record) = build_record(pending, self.senders) {
            debug!(ts = record.ts, sender = %record.sender, "greeting found");
            self.output.push(record);
        }
    }
}

/// Parser for text-message exports.
///
/// # Example
///
/// ```rust,no_run
/// use greetpack::GreetingParser;
/// use std::path::Path;
///
/// let parser = GreetingParser::new();
/// let records = parser.parse_file(Path::new("raw-messages.txt"))?;
/// # Ok::<(), greetpack::GreetpackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GreetingParser<Tz: TimeZone = Local> {
    config: ParserConfig,
    filter: GreetingFilter,
    tz: Tz,
}

impl GreetingParser {
    /// Creates a parser with default configuration, reading times as local.
    pub fn new() -> Self {
        let config = ParserConfig::default();
        Self {
            filter: GreetingFilter::from_config(&config),
            config,
            tz: Local,
        }
    }

    /// Creates a parser with custom configuration, reading times as local.
    pub fn with_config(config: ParserConfig) -> Result<Self> {
        GreetingParser::with_timezone(config, Local)
    }
}

impl Default for GreetingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> GreetingParser<Tz> {
    /// Creates a parser that reads header times in `tz`.
    pub fn with_timezone(config: ParserConfig, tz: Tz) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            filter: GreetingFilter::from_config(&config),
            config,
            tz,
        })
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Parses an export held in memory.
    pub fn parse_str(&self, text: &str) -> Result<Vec<GreetingRecord>> {
        let mut assembler = MessageAssembler::new(&self.config, &self.filter, &self.tz);

        for line in text.lines() {
            assembler.feed(line)?;
        }

        let records = assembler.finish();
        info!(greetings = records.len(), "parsed export");
        Ok(records)
    }

    /// Reads and parses an export file.
    pub fn parse_file(&self, path: &Path) -> Result<Vec<GreetingRecord>> {
        let text = fs::read_to_string(path)?;
        self.parse_str(&text)
    }
}

/// Parses an export with the default configuration in local time.
pub fn parse(text: &str) -> Result<Vec<GreetingRecord>> {
    GreetingParser::new().parse_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const JAN_5_0701: i64 = 1704438060000;

    fn parse_utc(text: &str) -> Result<Vec<GreetingRecord>> {
        GreetingParser::with_timezone(ParserConfig::default(), Utc)?.parse_str(text)
    }

    fn assembler<'c>(
        config: &'c ParserConfig,
        filter: &'c GreetingFilter,
    ) -> MessageAssembler<'c, Utc> {
        MessageAssembler::new(config, filter, &Utc)
    }

    // =========================================================================
    // State machine transitions
    // =========================================================================

    #[test]
    fn test_header_starts_message() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        assert!(asm.current().is_none());
        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();

        assert_eq!(asm.current(), Some(&PendingMessage::new(JAN_5_0701)));
        assert_eq!(asm.state(), ScanState::Scanning);
    }

    #[test]
    fn test_sender_overwrites() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("Me").unwrap();
        asm.feed("+15551234567").unwrap();

        assert_eq!(asm.current().unwrap().sender, Some(Sender::Counterpart));
    }

    #[test]
    fn test_sender_without_message_is_ignored() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Me").unwrap();
        asm.feed("good morning").unwrap();

        assert!(asm.current().is_none());
        assert!(asm.finish().is_empty());
    }

    #[test]
    fn test_content_before_sender_is_dropped() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("orphan line").unwrap();
        asm.feed("Me").unwrap();
        asm.feed("good morning").unwrap();

        assert_eq!(asm.current().unwrap().content, "good morning");
    }

    #[test]
    fn test_tapback_block_absorbs_everything() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("Me").unwrap();
        asm.feed("good morning").unwrap();
        asm.feed("Tapbacks:").unwrap();
        asm.feed("Loved by +15551234567").unwrap();
        asm.feed("Tapbacks:").unwrap();
        asm.feed("good morning again").unwrap();

        let current = asm.current().unwrap();
        assert_eq!(asm.state(), ScanState::InTapbacks);
        assert_eq!(current.content, "good morning");
        assert_eq!(
            current.tapbacks,
            vec!["Loved by +15551234567", "Tapbacks:", "good morning again"]
        );
    }

    #[test]
    fn test_sender_marker_ends_tapback_block() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("Me").unwrap();
        asm.feed("good morning").unwrap();
        asm.feed("Tapbacks:").unwrap();
        asm.feed("Liked by Me").unwrap();
        asm.feed("+15551234567").unwrap();
        assert_eq!(asm.state(), ScanState::Scanning);

        // Content after the block joins the same message
        asm.feed("sunshine").unwrap();
        let current = asm.current().unwrap();
        assert_eq!(current.content, "good morning\nsunshine");
        assert_eq!(current.sender, Some(Sender::Counterpart));
    }

    #[test]
    fn test_header_ends_tapback_block() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("Me").unwrap();
        asm.feed("good morning").unwrap();
        asm.feed("Tapbacks:").unwrap();
        asm.feed("Loved by +15551234567").unwrap();
        asm.feed("Jan 6, 2024 7:01:00 AM").unwrap();

        assert_eq!(asm.state(), ScanState::Scanning);
        assert_eq!(asm.records().len(), 1);
        assert_eq!(asm.records()[0].react.as_deref(), Some("❤️"));
        assert!(asm.current().unwrap().tapbacks.is_empty());
    }

    #[test]
    fn test_tapbacks_without_message_are_discarded() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Tapbacks:").unwrap();
        asm.feed("Loved by Me").unwrap();
        assert_eq!(asm.state(), ScanState::InTapbacks);
        assert!(asm.current().is_none());
    }

    #[test]
    fn test_invalid_header_is_fatal() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("Me").unwrap();
        let err = asm.feed("Feb 30, 2024 7:01:00 AM").unwrap_err();

        assert!(err.is_invalid_timestamp());
        assert!(err.to_string().contains("line 3"));
    }

    // =========================================================================
    // Record building
    // =========================================================================

    #[test]
    fn test_build_record_collapses_first_newline_only() {
        let mut pending = PendingMessage::new(1);
        pending.sender = Some(Sender::Owner);
        pending.content = "good\nmorning\nto\nyou".to_string();

        let record = build_record(pending, &SenderTable::default()).unwrap();
        assert_eq!(record.msg, "good morning\nto\nyou");
    }

    #[test]
    fn test_build_record_requires_sender() {
        let mut pending = PendingMessage::new(1);
        pending.content = "good morning".to_string();
        assert!(build_record(pending, &SenderTable::default()).is_none());
    }

    #[test]
    fn test_build_record_tags() {
        let table = SenderTable::new("Me", "ana", "leo");
        let mut pending = PendingMessage::new(7);
        pending.sender = Some(Sender::Counterpart);
        pending.content = "gm".to_string();
        pending.tapbacks = vec!["Laughed at by Me".to_string()];

        let record = build_record(pending, &table).unwrap();
        assert_eq!(record, GreetingRecord::new(7, "gm", "leo").with_react("😂"));
    }

    // =========================================================================
    // Whole exports
    // =========================================================================

    #[test]
    fn test_parse_single_greeting() {
        let text = "Jan 5, 2024 7:01:00 AM\nMe\nGood morning!\nTapbacks:\nLoved by +15551234567";
        let records = parse_utc(text).unwrap();

        assert_eq!(
            records,
            vec![GreetingRecord::new(JAN_5_0701, "Good morning!", "ry").with_react("❤️")]
        );
    }

    #[test]
    fn test_parse_phrase_split_across_lines_is_not_a_greeting() {
        let text = "Jan 5, 2024 7:01:00 AM\nMe\nGood\nmorning";
        assert!(parse_utc(text).unwrap().is_empty());
    }

    #[test]
    fn test_parse_two_line_greeting() {
        let text = "Jan 5, 2024 7:01:00 AM\n+15551234567\nGood morning\n☀️";
        let records = parse_utc(text).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].msg, "Good morning ☀️");
        assert_eq!(records[0].sender, "bb");
        assert_eq!(records[0].react, None);
    }

    #[test]
    fn test_parse_skips_long_and_empty() {
        let text = "\
Jan 5, 2024 7:01:00 AM
Jan 5, 2024 7:02:00 AM
Me
Good morning, hope you have the best day today and beyond!!
Jan 5, 2024 7:03:00 AM
Me
good morning
";
        let records = parse_utc(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].ts, JAN_5_0701 + 2 * 60_000);
    }

    #[test]
    fn test_parse_keeps_input_order() {
        let text = "\
Jan 6, 2024 7:00:00 AM
Me
good morning
Jan 5, 2024 7:00:00 AM
Me
good morning
";
        let records = parse_utc(text).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].ts > records[1].ts);
    }

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let text = "\u{feff}  Jan 5, 2024 7:01:00 AM  \r\n\r\n\tMe\r\n   \r\n good morning \r\n";
        let records = parse_utc(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].msg, "good morning");
    }

    #[test]
    fn test_feed_counts_blank_lines() {
        let config = ParserConfig::default();
        let filter = GreetingFilter::from_config(&config);
        let mut asm = assembler(&config, &filter);

        asm.feed("Jan 5, 2024 7:01:00 AM").unwrap();
        asm.feed("").unwrap();
        asm.feed("   ").unwrap();
        assert_eq!(asm.state(), ScanState::Scanning);
        assert!(asm.current().unwrap().content.is_empty());

        let err = asm.feed("  Feb 30, 2024 7:01:00 AM ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid timestamp on line 4: 'Feb 30, 2024 7:01:00 AM' (no such day)"
        );
    }

    #[test]
    fn test_parse_reports_physical_line_number() {
        let text = "\
Jan 5, 2024 7:01:00 AM
Me
good morning

Jan 5, 2024 7:05:00 AM
+15551234567
good morning to you


Feb 30, 2024 7:01:00 AM
Me
";
        let err = parse_utc(text).unwrap_err();
        assert!(err.to_string().contains("on line 10:"), "{err}");
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_utc("").unwrap().is_empty());
        assert!(parse_utc("\n \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_invalid_header_is_fatal() {
        let text = "Jan 5, 2024 7:01:00 AM\nMe\ngood morning\nFoo 6, 2024 7:01:00 AM\n";
        let err = parse_utc(text).unwrap_err();
        assert!(err.is_invalid_timestamp());
    }

    #[test]
    fn test_parser_rejects_invalid_config() {
        let config = ParserConfig::new().with_max_length(0);
        assert!(GreetingParser::with_config(config).unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = GreetingParser::new()
            .parse_file(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(err.is_io());
    }
}
