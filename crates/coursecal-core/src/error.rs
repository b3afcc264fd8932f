//! Error types for schedule parsing and temporal resolution.

use thiserror::Error;

/// Result type alias for schedule operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Error type for schedule parsing and temporal resolution operations
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A printed date or time string could not be parsed
    #[error("invalid date/time {value:?}: {source}")]
    InvalidDateTime {
        /// The string that failed to parse
        value: String,
        /// Underlying chrono parse error
        source: chrono::ParseError,
    },

    /// A wall-clock time does not exist in the civil timezone
    /// (falls inside a DST spring-forward gap)
    #[error("local time {0} does not exist in the civil timezone")]
    NonexistentLocalTime(String),

    /// Failed to extract text fragments from the source document
    #[error("extraction error: {0}")]
    ExtractionError(String),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScheduleError {
    /// Create an [`ScheduleError::InvalidDateTime`] from a failed parse
    #[inline]
    #[must_use = "returns ScheduleError for date/time parse failures"]
    pub fn invalid_date_time(value: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidDateTime {
            value: value.into(),
            source,
        }
    }
}
