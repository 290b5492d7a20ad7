//! Error types for staycal.

use thiserror::Error;

/// Errors that can occur in staycal operations.
///
/// The interchange codec itself never returns these: malformed feed content
/// degrades to dropped records instead.
#[derive(Error, Debug)]
pub enum StaycalError {
    #[error("Month index {0} is out of range (expected 0-11)")]
    InvalidMonth(u32),

    #[error("Year {0} is out of range (expected 1-9999)")]
    InvalidYear(i32),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Range starts on {start} but ends on {end}")]
    InvalidRange { start: String, end: String },

    #[error("Range {start} to {end} leaves the supported dates (0001-01-01 to 9999-12-30)")]
    DateOutOfBounds { start: String, end: String },

    #[error("Identifier {0:?} contains control characters")]
    InvalidId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for staycal operations.
pub type StaycalResult<T> = Result<T, StaycalError>;
