//! Course and meeting records.
//!
//! A [`Meeting`] is one day/time/location scheduling pattern collected while
//! walking a course block's detail rows. A [`Course`] is the resolved output
//! unit: the course header fields plus one finalized meeting pattern with
//! timezone-correct instants. A single printed course may legitimately
//! produce several `Course` records, one per meeting pattern.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One in-progress scheduling pattern for a course.
///
/// All fields are optional because the source lays detail rows out
/// irregularly; the assembler fills fields in as rows arrive and drops the
/// meeting at finalization if the day-set or time pair never showed up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Ordered weekday names, as printed (e.g. `["Monday", "Wednesday"]`)
    pub days: Vec<String>,

    /// Start/end time strings (e.g. `("9:00AM", "9:50AM")`)
    pub time: Option<(String, String)>,

    /// Campus name from the location row
    pub campus: Option<String>,

    /// Building from the location row
    pub location: Option<String>,

    /// Room from the location row
    pub room: Option<String>,

    /// Meeting-specific date range, when a continuation row restated it
    pub date_range: Option<(String, String)>,
}

impl Meeting {
    /// True once both a day-set and a time pair have been collected.
    ///
    /// A fresh day or time row arriving after this point means a second
    /// meeting pattern is starting and this one must be finalized first.
    #[inline]
    #[must_use]
    pub fn has_pattern(&self) -> bool {
        !self.days.is_empty() && self.time.is_some()
    }
}

/// The base fields shared by every meeting of one course block,
/// taken from the course header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseBase {
    /// Course reference number
    pub crn: u32,

    /// Course title
    pub title: String,

    /// Section/instruction details
    pub details: String,
}

/// A resolved course meeting, ready for event export.
///
/// Produced by the assembler from a course header row plus one finalized
/// [`Meeting`]; immutable once resolved. Exportable only when `days`,
/// `start` and `end` are all present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// Course reference number
    pub crn: u32,

    /// Course title
    pub title: String,

    /// Section/instruction details
    pub details: String,

    /// Ordered weekday names for this meeting pattern
    pub days: Vec<String>,

    /// First occurrence start, aligned to the first matching weekday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Tz>>,

    /// First occurrence end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Tz>>,

    /// Inclusive recurrence boundary, in UTC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<DateTime<Utc>>,

    /// Campus name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,

    /// Building
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Course {
    /// True when the course carries everything a recurring event needs
    /// except the recurrence boundary
    #[inline]
    #[must_use]
    pub fn is_exportable(&self) -> bool {
        !self.days.is_empty() && self.start.is_some() && self.end.is_some()
    }
}
