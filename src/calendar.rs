//! Calendar document assembly.
//!
//! Greetings are bucketed by the calendar day they were sent on and wrapped
//! in the document the calendar display reads:
//!
//! ```json
//! {
//!   "messages": { "2024-01-05": [ { "ts": 1704456060000, "msg": "Good morning!", "react": "❤️", "sender": "ry" } ] },
//!   "dates": ["2024-01-05"],
//!   "totalMessages": 1,
//!   "dateRange": { "start": "2024-01-05", "end": "2024-01-05" },
//!   "metadata": { "processedAt": "2024-01-06T09:00:00.000Z", "sourceFile": "raw-messages.txt" }
//! }
//! ```
//!
//! Field names are bound to by the display and must not change.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::message::GreetingRecord;

/// First and last day with a greeting. Both absent when there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Where the document came from and when it was built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Build time, written as `2024-01-06T09:00:00.000Z`
    #[serde(with = "iso_millis")]
    pub processed_at: DateTime<Utc>,

    /// File name of the export, as given by the caller
    pub source_file: String,
}

impl DocumentMetadata {
    /// Metadata stamped with the current time.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self::at(source_file, Utc::now())
    }

    /// Metadata with an explicit build time.
    pub fn at(source_file: impl Into<String>, processed_at: DateTime<Utc>) -> Self {
        Self {
            processed_at,
            source_file: source_file.into(),
        }
    }
}

/// One day's greetings with its position in the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberedDay {
    /// 1 for the earliest day, counting only days with greetings
    pub message_number: usize,
    pub messages: Vec<GreetingRecord>,
}

/// Greetings grouped by day, ready for the calendar display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDocument {
    /// Day key (`YYYY-MM-DD`) to that day's greetings in input order
    pub messages: BTreeMap<String, Vec<GreetingRecord>>,

    /// Every day key, ascending
    pub dates: Vec<String>,

    pub total_messages: usize,

    pub date_range: DateRange,

    pub metadata: DocumentMetadata,

    /// Present only after [`with_day_numbers`](Self::with_day_numbers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_with_numbers: Option<BTreeMap<String, NumberedDay>>,
}

impl CalendarDocument {
    /// Adds `messagesWithNumbers`, numbering days from 1 in date order.
    #[must_use]
    pub fn with_day_numbers(mut self) -> Self {
        let numbered = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, date)| {
                let messages = self.messages.get(date).cloned().unwrap_or_default();
                (
                    date.clone(),
                    NumberedDay {
                        message_number: i + 1,
                        messages,
                    },
                )
            })
            .collect();

        self.messages_with_numbers = Some(numbered);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }

    /// Counts for a human-readable report.
    pub fn summary(&self) -> ProcessingSummary {
        ProcessingSummary {
            total_messages: self.total_messages,
            date_count: self.dates.len(),
            start: self.date_range.start.clone(),
            end: self.date_range.end.clone(),
        }
    }
}

/// Statistics about a processed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub total_messages: usize,
    pub date_count: usize,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl ProcessingSummary {
    /// `2024-01-05 to 2024-03-01`, or `none` when there are no greetings.
    pub fn range_label(&self) -> String {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => format!("{start} to {end}"),
            _ => "none".to_string(),
        }
    }
}

/// Buckets greetings by the day they were sent in a given time zone.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use greetpack::GreetingRecord;
/// use greetpack::calendar::DateGrouper;
///
/// let grouper = DateGrouper::with_timezone(Utc);
/// let doc = grouper.group(
///     vec![
///         GreetingRecord::new(1704438060000, "Good morning!", "ry"),
///         GreetingRecord::new(1704351660000, "good morning", "bb"),
///     ],
///     "raw-messages.txt",
/// );
///
/// assert_eq!(doc.dates, vec!["2024-01-04", "2024-01-05"]);
/// assert_eq!(doc.date_range.start.as_deref(), Some("2024-01-04"));
/// assert_eq!(doc.total_messages, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DateGrouper<Tz: TimeZone = Local> {
    tz: Tz,
}

impl DateGrouper {
    /// Groups by the machine's local calendar.
    pub fn new() -> Self {
        Self { tz: Local }
    }
}

impl Default for DateGrouper {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> DateGrouper<Tz> {
    pub fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// `YYYY-MM-DD` for an epoch-millisecond timestamp.
    ///
    /// `None` if the timestamp is outside the representable range.
    pub fn date_key(&self, ts: i64) -> Option<String> {
        let utc = DateTime::from_timestamp_millis(ts)?;
        Some(
            utc.with_timezone(&self.tz)
                .date_naive()
                .format("%Y-%m-%d")
                .to_string(),
        )
    }

    /// Builds the calendar document, stamped with the current time.
    pub fn group(
        &self,
        messages: Vec<GreetingRecord>,
        source_file: impl Into<String>,
    ) -> CalendarDocument {
        self.group_with_metadata(messages, DocumentMetadata::new(source_file))
    }

    /// Builds the calendar document with caller-supplied metadata.
    ///
    /// Records keep their relative order inside each day. A record whose
    /// timestamp cannot be placed on a calendar is left out with a warning;
    /// the parser never produces one.
    pub fn group_with_metadata(
        &self,
        messages: Vec<GreetingRecord>,
        metadata: DocumentMetadata,
    ) -> CalendarDocument {
        let mut grouped: BTreeMap<String, Vec<GreetingRecord>> = BTreeMap::new();
        let mut total_messages = 0;

        for message in messages {
            let Some(key) = self.date_key(message.ts) else {
                warn!(ts = message.ts, "timestamp out of range, skipping greeting");
                continue;
            };
            grouped.entry(key).or_default().push(message);
            total_messages += 1;
        }

        let dates: Vec<String> = grouped.keys().cloned().collect();
        let date_range = DateRange {
            start: dates.first().cloned(),
            end: dates.last().cloned(),
        };

        info!(
            greetings = total_messages,
            days = dates.len(),
            "grouped greetings by day"
        );

        CalendarDocument {
            messages: grouped,
            dates,
            total_messages,
            date_range,
            metadata,
            messages_with_numbers: None,
        }
    }
}

/// Groups greetings by local calendar day.
pub fn group(messages: Vec<GreetingRecord>, source_file: impl Into<String>) -> CalendarDocument {
    DateGrouper::new().group(messages, source_file)
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
