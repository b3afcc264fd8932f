//! Temporal resolution for printed date/time strings.
//!
//! The schedule prints every date and time in one fixed civil timezone.
//! This module turns a meeting's raw strings into timezone-correct
//! instants:
//!
//! 1. Parse the range's first date combined with each time string as a
//!    naive local datetime.
//! 2. Shift both instants forward to the first weekday present in the
//!    meeting's day-set (minimum non-negative modulo-7 delta), so the
//!    first generated occurrence always falls on a requested weekday even
//!    when the printed range does not start on one.
//! 3. Compute the recurrence boundary as the last instant of the range's
//!    final calendar day: civil midnight of (end date + 1 day) minus one
//!    millisecond, converted to UTC.
//!
//! The weekday shift is applied to the naive calendar date and then
//! re-localized, so a shift that crosses a DST transition keeps the
//! printed wall-clock time instead of drifting by an hour.

use crate::error::{Result, ScheduleError};
use crate::weekday;
use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

/// The fixed civil timezone all printed dates and times are interpreted in
pub const CIVIL_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Printed date format (`01/06/2025`)
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Printed date + time format after whitespace removal (`01/06/2025 9:00AM`)
const DATE_TIME_FORMAT: &str = "%m/%d/%Y %I:%M%p";

/// Timezone-correct instants for one meeting pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTimes {
    /// First occurrence start, aligned to the day-set
    pub start: DateTime<Tz>,

    /// First occurrence end
    pub end: DateTime<Tz>,

    /// Inclusive recurrence boundary, in UTC
    pub until: Option<DateTime<Utc>>,
}

/// Resolve a meeting's day-set, time pair and date range into instants.
///
/// `start_time`/`end_time` are whitespace-free time strings such as
/// `9:00AM`; `range_start`/`range_end` are printed `MM/DD/YYYY` dates.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDateTime`] if the range start or either
/// time string fails to parse, and [`ScheduleError::NonexistentLocalTime`]
/// if the combination lands in a DST gap. An unparsable `range_end` is not
/// an error: the meeting still resolves, with no recurrence boundary.
pub fn resolve_times(
    days: &[String],
    start_time: &str,
    end_time: &str,
    range_start: &str,
    range_end: &str,
) -> Result<ResolvedTimes> {
    let naive_start = parse_naive(range_start, start_time)?;
    let naive_end = parse_naive(range_start, end_time)?;

    let shift = weekday_shift(naive_start.weekday(), days);
    let naive_start = naive_start + Days::new(shift);
    let naive_end = naive_end + Days::new(shift);

    let start = localize(naive_start)?;
    let end = localize(naive_end)?;

    let until = match recurrence_until(range_end) {
        Ok(until) => Some(until),
        Err(e) => {
            log::warn!("unusable range end {range_end:?}: {e}");
            None
        }
    };

    Ok(ResolvedTimes { start, end, until })
}

/// Compute the inclusive recurrence boundary for a printed range end date.
///
/// The boundary is the last instant of that calendar day in the civil
/// timezone: midnight of the following day minus one millisecond,
/// converted to UTC.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidDateTime`] if the date fails to parse.
pub fn recurrence_until(range_end: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(range_end.trim(), DATE_FORMAT)
        .map_err(|e| ScheduleError::invalid_date_time(range_end.trim(), e))?;
    let next_midnight = (date + Days::new(1)).and_time(NaiveTime::MIN);
    let boundary = localize(next_midnight)?;
    Ok(boundary.with_timezone(&Utc) - Duration::milliseconds(1))
}

/// Parse a printed date and whitespace-free time into a naive local datetime
fn parse_naive(date: &str, time: &str) -> Result<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    NaiveDateTime::parse_from_str(&combined, DATE_TIME_FORMAT)
        .map_err(|e| ScheduleError::invalid_date_time(combined, e))
}

/// Interpret a naive datetime in the civil timezone.
///
/// Ambiguous wall-clock times (DST fall-back) take the earlier instant.
fn localize(naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    CIVIL_TIMEZONE
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ScheduleError::NonexistentLocalTime(naive.to_string()))
}

/// Minimum non-negative number of days forward (modulo 7) from `start` to
/// any weekday in `days`. Zero when `start` is already in the set or the
/// set names no recognized weekday.
fn weekday_shift(start: Weekday, days: &[String]) -> u64 {
    let from = start.num_days_from_sunday();
    days.iter()
        .filter_map(|name| weekday::from_full_name(name))
        .map(|day| u64::from((day.num_days_from_sunday() + 7 - from) % 7))
        .min()
        .unwrap_or(0)
}
