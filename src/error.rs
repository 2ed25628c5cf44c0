//! Unified error types for greetpack.
//!
//! This module provides a single [`GreetpackError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Only two things are fatal while parsing: a configuration that cannot be
//! used, and a timestamp line that looks right but names no real instant.
//! Everything else in an export is recovered from on a best-effort basis.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for greetpack operations.
///
/// # Example
///
/// ```rust
/// use greetpack::error::Result;
/// use greetpack::GreetingRecord;
///
/// fn my_function() -> Result<Vec<GreetingRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, GreetpackError>;

/// The error type for all greetpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GreetpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line has the shape of a timestamp header but does not denote a
    /// valid instant.
    ///
    /// This occurs when:
    /// - The month abbreviation is not a month (`Foo 5, 2024 ...`)
    /// - The day does not exist in that month (`Feb 30, 2024 ...`)
    /// - The hour is above 12 or minutes/seconds are out of range
    #[error("Invalid timestamp on line {line}: '{input}' ({reason})")]
    InvalidTimestamp {
        /// 1-based line number in the input, blank lines included
        line: usize,
        /// The offending line, trimmed
        input: String,
        /// Short description of what is wrong
        reason: &'static str,
    },

    /// The parser configuration cannot be used.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// JSON parsing/serialization error.
    ///
    /// This can occur when writing the calendar document or reading a
    /// configuration file.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl GreetpackError {
    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(line: usize, input: impl Into<String>, reason: &'static str) -> Self {
        GreetpackError::InvalidTimestamp {
            line,
            input: input.into(),
            reason,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GreetpackError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, GreetpackError::Io(_))
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, GreetpackError::InvalidTimestamp { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, GreetpackError::InvalidConfig { .. })
    }
}
