//! Error types for event building and ICS serialization.

use thiserror::Error;

/// Result type alias for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Error type for calendar export operations
#[derive(Error, Debug)]
pub enum CalendarError {
    /// No exportable events were supplied to the serializer
    #[error("no exportable events; nothing to serialize")]
    NoEvents,

    /// An event carries out-of-range date/time components
    #[error("invalid event {title:?}: {message}")]
    InvalidEvent {
        /// Title of the offending event
        title: String,
        /// Description of what is out of range
        message: String,
    },
}

impl CalendarError {
    /// Create an [`CalendarError::InvalidEvent`]
    #[inline]
    #[must_use = "returns CalendarError for invalid events"]
    pub fn invalid_event(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            title: title.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_event_display() {
        let err = CalendarError::invalid_event("Intro to X", "month 13 out of range");
        let display = format!("{err}");
        assert!(display.contains("Intro to X"));
        assert!(display.contains("month 13"));
    }
}
