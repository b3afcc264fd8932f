//! Projection of resolved courses into the event serialization contract.
//!
//! The serializer consumes events as explicit component tuples
//! `[year, month, day, hour, minute]` plus an input/output timezone type,
//! mirroring the attribute shape of common calendar-file generators. The
//! single configuration choice is [`TimestampMode`]: whether exported
//! instants are rendered in UTC or as local wall-clock components. The
//! recurrence boundary (`UNTIL`) is always rendered in UTC regardless of
//! that mode.

use chrono::{DateTime, Datelike, Timelike, Utc};
use coursecal_core::{weekday, Course};
use serde::{Deserialize, Serialize};

/// `[year, month, day, hour, minute]`, months 1-12, hours 0-23
pub type DateTimeComponents = [u32; 5];

/// Whether exported instants are UTC or local wall-clock components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// Components converted to UTC
    #[default]
    Utc,
    /// Local wall-clock components in the civil timezone
    Local,
}

impl TimestampMode {
    /// Wire-format name (`"utc"` or `"local"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utc => "utc",
            Self::Local => "local",
        }
    }
}

/// One event in the serializer's attribute shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAttributes {
    /// Event title (course title)
    pub title: String,

    /// Event description (course details)
    pub description: String,

    /// Start components
    pub start: DateTimeComponents,

    /// Time basis of `start` as supplied
    pub start_input_type: TimestampMode,

    /// Time basis `start` should be rendered in
    pub start_output_type: TimestampMode,

    /// End components
    pub end: DateTimeComponents,

    /// Time basis of `end` as supplied
    pub end_input_type: TimestampMode,

    /// Time basis `end` should be rendered in
    pub end_output_type: TimestampMode,

    /// Comma-join of building and room, omitted when both absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Weekly recurrence rule bounded by an inclusive UTC `UNTIL`
    pub recurrence_rule: String,

    /// Time-transparency; exported meetings always block time
    pub transp: &'static str,
}

/// Calendar-level header attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarAttributes {
    /// PRODID value
    pub product_id: String,

    /// Publication method; always `PUBLISH`
    pub method: &'static str,

    /// Calendar display name
    pub cal_name: String,
}

impl CalendarAttributes {
    /// Create header attributes with the given calendar name
    #[must_use]
    pub fn new(cal_name: impl Into<String>) -> Self {
        Self {
            product_id: "-//coursecal//EN".to_string(),
            method: "PUBLISH",
            cal_name: cal_name.into(),
        }
    }
}

/// Build the weekly recurrence rule string for an ordered day-set.
///
/// BYDAY preserves the order the days were printed in; it is not
/// re-sorted.
#[must_use = "returns the RRULE value string"]
pub fn recurrence_rule(days: &[String], until: &DateTime<Utc>) -> String {
    let byday: Vec<&str> = days
        .iter()
        .filter_map(|name| weekday::from_full_name(name))
        .map(weekday::byday_code)
        .collect();
    format!(
        "FREQ=WEEKLY;BYDAY={};INTERVAL=1;UNTIL={}",
        byday.join(","),
        until.format("%Y%m%dT%H%M%SZ")
    )
}

/// Project exportable courses into event attributes.
///
/// Courses missing any of day-set, start, end or recurrence boundary are
/// excluded with no error raised; a parsed schedule may legitimately
/// contribute fewer events than courses.
#[must_use = "returns the event list for serialization"]
pub fn build_events(courses: &[Course], mode: TimestampMode) -> Vec<EventAttributes> {
    courses
        .iter()
        .filter_map(|course| build_event(course, mode))
        .collect()
}

fn build_event(course: &Course, mode: TimestampMode) -> Option<EventAttributes> {
    if course.days.is_empty() {
        return None;
    }
    let (start, end, until) = match (course.start, course.end, course.until) {
        (Some(start), Some(end), Some(until)) => (start, end, until),
        _ => {
            log::debug!("CRN {} lacks temporal fields; not exported", course.crn);
            return None;
        }
    };

    let (start, end) = match mode {
        TimestampMode::Utc => (
            components(&start.with_timezone(&Utc)),
            components(&end.with_timezone(&Utc)),
        ),
        TimestampMode::Local => (components(&start), components(&end)),
    };

    let location = match (&course.location, &course.room) {
        (None, None) => None,
        (location, room) => Some(
            [location.as_deref(), room.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", "),
        ),
    };

    Some(EventAttributes {
        title: course.title.clone(),
        description: course.details.clone(),
        start,
        start_input_type: mode,
        start_output_type: mode,
        end,
        end_input_type: mode,
        end_output_type: mode,
        location,
        recurrence_rule: recurrence_rule(&course.days, &until),
        transp: "OPAQUE",
    })
}

/// Extract `[year, month, day, hour, minute]` from an instant
fn components<T: Datelike + Timelike>(instant: &T) -> DateTimeComponents {
    [
        instant.year().unsigned_abs(), // schedule years are always AD
        instant.month(),
        instant.day(),
        instant.hour(),
        instant.minute(),
    ]
}
