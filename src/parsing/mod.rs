//! Building blocks of the greeting parser.
//!
//! - [`classifier`] - line tagging and timestamp header resolution
//! - [`filter`] - greeting detection
//! - [`reactions`] - tapback text to emoji glyphs

pub mod classifier;
pub mod filter;
pub mod reactions;

pub use classifier::{LineClassifier, LineKind, TimestampHeader};
pub use filter::GreetingFilter;
pub use reactions::{translate_tapback, translate_tapbacks};
