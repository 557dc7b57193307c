//! Error types for class entry extraction.

use thiserror::Error;

/// A specialized Result type for class entry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting or decoding class entries.
///
/// Every variant aborts the whole HTML parse: a table that is structurally
/// incomplete is rejected rather than partially salvaged.
#[derive(Debug, Error)]
pub enum Error {
    /// A data row is missing one of the fixed-position cells.
    #[error("column {index} is missing in row {row}")]
    MissingColumn {
        /// The cell index that was expected.
        index: usize,
        /// The row index within the table.
        row: usize,
    },

    /// A day string contained a character outside the weekday alphabet.
    #[error("invalid day of week: {day} ({source_text})")]
    InvalidDayOfWeek {
        /// The offending character.
        day: char,
        /// The full day string it came from.
        source_text: String,
    },

    /// A date range cell did not have both a start and an end.
    #[error("invalid date range: {text}")]
    InvalidDateRange {
        /// The raw cell text.
        text: String,
    },

    /// One half of a date range could not be read as month/day.
    #[error("invalid date: {text}")]
    InvalidDate {
        /// The raw date text.
        text: String,
    },

    /// The row selector could not be compiled.
    #[error("invalid row selector: {selector}")]
    InvalidSelector {
        /// The selector source.
        selector: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates an invalid date range error.
    pub fn invalid_date_range(text: impl Into<String>) -> Self {
        Error::InvalidDateRange { text: text.into() }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(text: impl Into<String>) -> Self {
        Error::InvalidDate { text: text.into() }
    }
}
