//! # coursecal-calendar
//!
//! Turns resolved course meetings into RFC5545 weekly recurring events and
//! serializes them to iCalendar text.
//!
//! - [`event`] - projection of [`coursecal_core::Course`] records into the
//!   serializer's attribute shape: component tuples, timezone mode,
//!   `FREQ=WEEKLY` recurrence rules bounded by an inclusive UTC `UNTIL`.
//! - [`ics`] - the iCalendar writer: CRLF framing, line folding, text
//!   escaping.
//!
//! ## Example
//!
//! ```
//! use coursecal_calendar::{build_events, serialize_calendar, CalendarAttributes, TimestampMode};
//!
//! let courses = Vec::new(); // from coursecal-parse
//! let events = build_events(&courses, TimestampMode::Utc);
//! let calendar = CalendarAttributes::new("Class Schedule");
//! assert!(serialize_calendar(&calendar, &events).is_err()); // nothing to export
//! ```

pub mod error;
pub mod event;
pub mod ics;

pub use error::{CalendarError, Result};
pub use event::{
    build_events, recurrence_rule, CalendarAttributes, DateTimeComponents, EventAttributes,
    TimestampMode,
};
pub use ics::serialize_calendar;
