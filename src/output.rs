//! JSON output for calendar documents.
//!
//! The document is pretty-printed with two-space indentation.
//!
//! # Example
//!
//! ```rust,no_run
//! use greetpack::output::write_json;
//! use greetpack::{group, parse};
//!
//! let records = parse("Jan 5, 2024 7:01:00 AM\nMe\nGood morning!")?;
//! let doc = group(records, "raw-messages.txt");
//! write_json(&doc, "processed-messages.json")?;
//! # Ok::<(), greetpack::GreetpackError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::calendar::CalendarDocument;
use crate::error::Result;

/// Converts a document to a pretty-printed JSON string.
pub fn to_json(doc: &CalendarDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Writes a document to a JSON file, replacing any existing file.
pub fn write_json(doc: &CalendarDocument, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writer.flush()?;
    Ok(())
}

/// Reads a document back from JSON.
pub fn from_json(json: &str) -> Result<CalendarDocument> {
    Ok(serde_json::from_str(json)?)
}
