//! # coursecal-core
//!
//! Core data model and temporal resolution for coursecal, a converter from
//! printed academic schedule PDFs to RFC5545 recurring calendar events.
//!
//! The pipeline moves strictly forward through three stages, each consuming
//! the previous stage's output:
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | Layout reconstruction | positioned [`TextFragment`]s | ordered [`Row`]s |
//! | Course/meeting assembly | rows | resolved [`Course`] records |
//! | Event building | courses | calendar events |
//!
//! This crate holds the types shared across those stages plus the
//! [`temporal`] resolver that turns printed date/time strings into
//! timezone-correct instants in the fixed civil timezone
//! ([`temporal::CIVIL_TIMEZONE`]).

pub mod course;
pub mod error;
pub mod fragment;
pub mod temporal;
pub mod weekday;

pub use course::{Course, CourseBase, Meeting};
pub use error::{Result, ScheduleError};
pub use fragment::{joined_text, Row, TextFragment};
pub use temporal::{recurrence_until, resolve_times, ResolvedTimes, CIVIL_TIMEZONE};
