//! Line classification for text-message exports.
//!
//! An export is a flat list of lines. A message starts with a timestamp
//! header, names its sender on its own line, carries one or more content
//! lines, and may end with a reaction block:
//!
//! ```text
//! Jan 5, 2024 7:01:00 AM
//! Me
//! Good morning!
//! Tapbacks:
//! Loved by +15551234567
//! ```
//!
//! Each trimmed line is classified on its own. Reaction entries have no
//! prefix of their own and are told apart by the assembler from context.

use std::sync::LazyLock;

use chrono::{Month, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone};
use regex::Regex;

use crate::config::SenderTable;
use crate::message::Sender;

/// `Jan 5, 2024 7:01:00 AM`, matched as a prefix.
///
/// Anything after the meridiem (read receipts, edit markers) is ignored.
static TIMESTAMP_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z]{3})\s+([0-9]{1,2}),\s+([0-9]{4})\s+([0-9]{1,2}):([0-9]{2}):([0-9]{2})\s+([AP]M)",
    )
    .expect("timestamp header pattern is valid")
});

/// What a single trimmed line means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opens a new message
    Timestamp(TimestampHeader<'a>),
    /// Names who sent the current message
    Sender(Sender),
    /// Opens the reaction block of the current message
    TapbackStart,
    /// Anything else
    Content(&'a str),
}

/// The fields of a timestamp header, as written.
///
/// The shape has been checked; whether the fields name a real instant is
/// decided by [`to_naive`](Self::to_naive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampHeader<'a> {
    pub month: &'a str,
    pub day: &'a str,
    pub year: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
    pub second: &'a str,
    pub pm: bool,
}

impl<'a> TimestampHeader<'a> {
    /// Extracts the header fields from a line, if it has the header shape.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = TIMESTAMP_HEADER.captures(line)?;
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        Some(Self {
            month: field(1),
            day: field(2),
            year: field(3),
            hour: field(4),
            minute: field(5),
            second: field(6),
            pm: field(7) == "PM",
        })
    }

    /// Resolves the header to a wall-clock date and time.
    ///
    /// Returns a short reason when the fields do not form a valid moment.
    pub fn to_naive(self) -> Result<NaiveDateTime, &'static str> {
        let month: Month = self.month.parse().map_err(|_| "unknown month")?;
        let day: u32 = self.day.parse().map_err(|_| "invalid day")?;
        let year: i32 = self.year.parse().map_err(|_| "invalid year")?;
        let date = NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            .ok_or("no such day")?;

        let hour12: u32 = self.hour.parse().map_err(|_| "invalid hour")?;
        if hour12 > 12 {
            return Err("hour out of range");
        }
        let hour = if self.pm { hour12 % 12 + 12 } else { hour12 % 12 };
        let minute: u32 = self.minute.parse().map_err(|_| "invalid minute")?;
        let second: u32 = self.second.parse().map_err(|_| "invalid second")?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or("time out of range")?;

        Ok(NaiveDateTime::new(date, time))
    }

    /// Resolves the header to epoch milliseconds in the given time zone.
    ///
    /// When a wall-clock time occurs twice (the hour repeated at the end of
    /// daylight saving), the earlier instant is used. A time skipped by the
    /// jump into daylight saving is read with the offset in force just
    /// before the jump, so `2:30 AM` on a spring-forward night lands on
    /// `3:30 AM`.
    pub fn to_millis<Tz: TimeZone>(self, tz: &Tz) -> Result<i64, &'static str> {
        let naive = self.to_naive()?;
        if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
            return Ok(dt.timestamp_millis());
        }

        let day_before = naive
            .checked_sub_signed(TimeDelta::days(1))
            .ok_or("time out of range")?;
        let offset = tz.offset_from_utc_datetime(&day_before).fix();
        naive
            .and_local_timezone(offset)
            .single()
            .map(|dt| dt.timestamp_millis())
            .ok_or("local time does not exist")
    }
}

/// Tags trimmed lines as headers, sender markers, reaction markers or content.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier<'c> {
    senders: &'c SenderTable,
    tapback_marker: &'c str,
}

impl<'c> LineClassifier<'c> {
    pub fn new(senders: &'c SenderTable, tapback_marker: &'c str) -> Self {
        Self {
            senders,
            tapback_marker,
        }
    }

    /// Classifies one trimmed line. The first matching rule wins:
    /// timestamp header, sender marker, reaction marker, content.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(header) = TimestampHeader::parse(line) {
            return LineKind::Timestamp(header);
        }
        if let Some(sender) = self.senders.resolve(line) {
            return LineKind::Sender(sender);
        }
        if line == self.tapback_marker {
            return LineKind::TapbackStart;
        }
        LineKind::Content(line)
    }
}
