//! Stateful course/meeting assembly from reconstructed rows.
//!
//! The schedule's table body is irregular: a course's day, time and
//! location details may arrive as one row each, wrapped across several
//! physical rows, or restated entirely when a course lists two independent
//! meeting patterns back to back. Rather than assuming a fixed per-course
//! row count, each row is classified into an explicit [`RowKind`] and fed
//! through a small state machine that finalizes the pending meeting
//! whenever a fresh day+time pattern would otherwise overwrite a complete
//! one.
//!
//! The carried date-range strings mirror the source document's convention
//! that a printed date range applies to the course until restated; they
//! are threaded through the assembler state, never held globally.

use coursecal_core::course::{Course, CourseBase, Meeting};
use coursecal_core::{joined_text, resolve_times, weekday, Row};
use regex::Regex;
use std::sync::LazyLock;

/// First cell of the row that opens the table body
pub const TABLE_HEADER_LABEL: &str = "Title";

/// First cell of the row that closes the table body
pub const TABLE_FOOTER_LABEL: &str = "Total Hours";

/// Two dates joined by a dash: `01/06/2025 - 04/25/2025`
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{4}\s*-\s*\d{2}/\d{2}/\d{4}$").expect("valid date range pattern")
});

/// A clock time token: colon, two-digit minutes, AM/PM
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\d{2}\s*[AP]M").expect("valid time pattern"));

/// A comma followed by digits, as in `Bldg 1, Room 101`
static COMMA_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",.*\d").expect("valid comma-digits pattern"));

/// Classification of one table-body row, evaluated in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// 5- or 6-cell row opening a new course block
    Header,
    /// Date-range continuation (`MM/DD/YYYY - MM/DD/YYYY`)
    DateRange,
    /// Comma-separated full weekday names
    Day,
    /// Clock time token present
    Time,
    /// Single-cell campus/building/room line
    Location,
    /// Anything else (instructor names, hour counts, notes)
    Unrecognized,
}

/// Classify a table-body row.
///
/// `meeting_has_room` is the one piece of assembler state the
/// classification needs: a location line is only accepted while the
/// in-progress meeting has no room yet.
///
/// The location test is a best-effort heuristic inherited from the source
/// document's conventions: a single-cell row containing a comma is a
/// location only if it also contains an asterisk or a comma followed by
/// digits, which is what separates `Main Campus, Bldg 1, Room 101` from an
/// instructor line like `Doe, Jane`. Instructor names containing digits or
/// asterisked room-less entries would be misclassified; the schedules this
/// targets do not print such lines.
#[must_use = "returns the row's classification"]
pub fn classify_row(row: &Row, meeting_has_room: bool) -> RowKind {
    if (row.len() == 5 || row.len() == 6) && row[0] != TABLE_HEADER_LABEL {
        return RowKind::Header;
    }

    let joined = joined_text(row);
    if DATE_RANGE_RE.is_match(&joined) {
        return RowKind::DateRange;
    }
    if !joined.is_empty()
        && joined
            .split(',')
            .all(|token| weekday::is_full_name(token.trim()))
    {
        return RowKind::Day;
    }
    if TIME_RE.is_match(&joined) {
        return RowKind::Time;
    }
    if row.len() == 1
        && joined.contains(',')
        && !meeting_has_room
        && (joined.contains('*') || COMMA_DIGITS_RE.is_match(&joined))
    {
        return RowKind::Location;
    }

    RowKind::Unrecognized
}

/// Assemble resolved courses from the document's full row sequence.
///
/// The table body is the span strictly between the row whose first cell is
/// [`TABLE_HEADER_LABEL`] and the row whose first cell is
/// [`TABLE_FOOTER_LABEL`]. If either marker is absent, or the footer does
/// not come after the header, no partial table is recognized and the
/// result is empty.
#[must_use = "returns the resolved course list"]
pub fn assemble_courses(rows: &[Row]) -> Vec<Course> {
    let Some(body) = table_body(rows) else {
        log::warn!("table markers not found; no courses recognized");
        return Vec::new();
    };

    let mut state = AssemblerState::default();
    for row in body {
        state.push_row(row);
    }
    state.finish()
}

/// Locate the table body between the header and footer marker rows
fn table_body(rows: &[Row]) -> Option<&[Row]> {
    let header = rows
        .iter()
        .position(|row| row.first().map(String::as_str) == Some(TABLE_HEADER_LABEL))?;
    let footer = rows
        .iter()
        .position(|row| row.first().map(String::as_str) == Some(TABLE_FOOTER_LABEL))?;
    (footer > header).then(|| &rows[header + 1..footer])
}

/// Single-pass assembler accumulator.
///
/// Owns the in-progress course base, the carried date-range strings and
/// the pending meeting; all three are replaced wholesale as rows arrive.
#[derive(Debug, Default)]
struct AssemblerState {
    /// Header fields of the course block currently being walked
    base: Option<CourseBase>,

    /// Date range carried from the last header or continuation row
    carried_range: Option<(String, String)>,

    /// Meeting pattern currently being collected
    meeting: Meeting,

    /// Finalized output
    courses: Vec<Course>,
}

impl AssemblerState {
    fn push_row(&mut self, row: &Row) {
        match classify_row(row, self.meeting.room.is_some()) {
            RowKind::Header => self.start_course(row),
            RowKind::DateRange => self.date_range_row(&joined_text(row)),
            RowKind::Day => self.day_row(&joined_text(row)),
            RowKind::Time => self.time_row(&joined_text(row)),
            RowKind::Location => self.location_row(&joined_text(row)),
            RowKind::Unrecognized => {}
        }
    }

    /// Open a new course block from a 5- or 6-cell header row.
    ///
    /// Cells are [title, details, (skipped), crn, date-range]; the 6-cell
    /// variant is a line-wrapped date range split by the extractor, so
    /// cells 5 and 6 are concatenated back together first.
    fn start_course(&mut self, row: &Row) {
        self.finalize_meeting();

        let range_cell = if row.len() == 6 {
            format!("{} {}", row[4], row[5])
        } else {
            row[4].clone()
        };

        self.base = Some(CourseBase {
            crn: row[3].trim().parse().unwrap_or_default(),
            title: row[0].clone(),
            details: row[1].clone(),
        });
        self.carried_range = split_range(&range_cell);
    }

    /// A restated date range: a second meeting pattern may be starting
    fn date_range_row(&mut self, joined: &str) {
        if self.meeting.has_pattern() {
            self.finalize_meeting();
        }
        let range = split_range(joined);
        self.carried_range.clone_from(&range);
        self.meeting.date_range = range;
    }

    fn day_row(&mut self, joined: &str) {
        if self.meeting.has_pattern() {
            self.finalize_meeting();
        }
        self.meeting.days = joined
            .split(',')
            .map(|token| token.trim().to_string())
            .collect();
    }

    /// Attach a time pair: whitespace removed, split on the first dash
    fn time_row(&mut self, joined: &str) {
        let compact: String = joined.split_whitespace().collect();
        if let Some((start, end)) = compact.split_once('-') {
            if !start.is_empty() && !end.is_empty() {
                self.meeting.time = Some((start.to_string(), end.to_string()));
            }
        }
    }

    /// Split a location line into campus, building and room.
    ///
    /// The first comma-bounded token goes left, the last goes right, and
    /// everything between joins into the middle, so building names that
    /// themselves contain commas survive. Fewer than three parts degrades
    /// to a location-only record.
    fn location_row(&mut self, joined: &str) {
        let parts: Vec<&str> = joined.split(',').map(str::trim).collect();
        if parts.len() >= 3 {
            self.meeting.campus = Some(parts[0].to_string());
            self.meeting.location = Some(parts[1..parts.len() - 1].join(", "));
            self.meeting.room = Some(parts[parts.len() - 1].to_string());
        } else {
            log::debug!("location line did not split three ways: {joined:?}");
            self.meeting.campus = None;
            self.meeting.location = Some(joined.trim().to_string());
            self.meeting.room = None;
        }
    }

    /// Emit the pending meeting as a resolved course, or drop it.
    ///
    /// A meeting without a day-set, a time pair, a usable date range or
    /// resolvable instants is silently dropped; a course may legitimately
    /// contribute zero exportable meetings.
    fn finalize_meeting(&mut self) {
        let meeting = std::mem::take(&mut self.meeting);
        let Some(base) = self.base.as_ref() else {
            return;
        };
        if meeting.days.is_empty() {
            return;
        }
        let Some((start_time, end_time)) = meeting.time else {
            return;
        };
        let range = meeting.date_range.or_else(|| self.carried_range.clone());
        let Some((range_start, range_end)) = range else {
            log::debug!("no date range for CRN {}; meeting dropped", base.crn);
            return;
        };

        match resolve_times(&meeting.days, &start_time, &end_time, &range_start, &range_end) {
            Ok(resolved) => self.courses.push(Course {
                crn: base.crn,
                title: base.title.clone(),
                details: base.details.clone(),
                days: meeting.days,
                start: Some(resolved.start),
                end: Some(resolved.end),
                until: resolved.until,
                campus: meeting.campus,
                location: meeting.location,
                room: meeting.room,
            }),
            Err(e) => {
                log::debug!("meeting for CRN {} did not resolve: {e}", base.crn);
            }
        }
    }

    /// Finalize the last pending meeting and return the output
    fn finish(mut self) -> Vec<Course> {
        self.finalize_meeting();
        self.courses
    }
}

/// Split a date-range cell on the dash into two trimmed halves
fn split_range(cell: &str) -> Option<(String, String)> {
    let (start, end) = cell.split_once('-')?;
    Some((start.trim().to_string(), end.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    /// The synthetic table from the format this parser targets: marker
    /// rows, one 5-cell course header, then day/time/location detail rows.
    fn synthetic_table() -> Vec<Row> {
        vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday, Wednesday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Main Campus, Bldg 1, Room 101"]),
            row(&["Total Hours"]),
        ]
    }

    #[test]
    fn test_classify_header_row() {
        let header = row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]);
        assert_eq!(classify_row(&header, false), RowKind::Header);

        // The marker row itself is not a course header
        let marker = row(&["Title", "Details", "Hours", "CRN", "Dates"]);
        assert_ne!(classify_row(&marker, false), RowKind::Header);
    }

    #[test]
    fn test_classify_six_cell_header() {
        let header = row(&[
            "Intro to X",
            "Lecture",
            "",
            "12345",
            "01/06/2025 -",
            "04/25/2025",
        ]);
        assert_eq!(classify_row(&header, false), RowKind::Header);
    }

    #[test]
    fn test_classify_date_range_row() {
        assert_eq!(
            classify_row(&row(&["01/06/2025 - 04/25/2025"]), false),
            RowKind::DateRange
        );
        assert_eq!(
            classify_row(&row(&["01/06/2025", "- 04/25/2025"]), false),
            RowKind::DateRange
        );
    }

    #[test]
    fn test_classify_day_row() {
        assert_eq!(
            classify_row(&row(&["Monday, Wednesday"]), false),
            RowKind::Day
        );
        assert_eq!(classify_row(&row(&["Friday"]), false), RowKind::Day);
        // Abbreviations are not recognized
        assert_eq!(classify_row(&row(&["Mon, Wed"]), false), RowKind::Unrecognized);
    }

    #[test]
    fn test_classify_time_row() {
        assert_eq!(
            classify_row(&row(&["9:00 AM - 9:50 AM"]), false),
            RowKind::Time
        );
        assert_eq!(
            classify_row(&row(&["12:30 PM - 1:45 PM"]), false),
            RowKind::Time
        );
    }

    #[test]
    fn test_classify_location_row_accepts_room_numbers() {
        assert_eq!(
            classify_row(&row(&["Main Campus, Bldg 1, Room 101"]), false),
            RowKind::Location
        );
    }

    #[test]
    fn test_classify_location_row_accepts_asterisk() {
        assert_eq!(
            classify_row(&row(&["Online Campus, Virtual, *"]), false),
            RowKind::Location
        );
    }

    #[test]
    fn test_classify_rejects_instructor_names() {
        // "Last, First" has neither an asterisk nor a comma-digits pair
        assert_eq!(
            classify_row(&row(&["Doe, Jane"]), false),
            RowKind::Unrecognized
        );
    }

    #[test]
    fn test_classify_location_requires_no_room_yet() {
        let location = row(&["Main Campus, Bldg 1, Room 101"]);
        assert_eq!(classify_row(&location, true), RowKind::Unrecognized);
    }

    #[test]
    fn test_end_to_end_synthetic_table() {
        let courses = assemble_courses(&synthetic_table());
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.crn, 12345);
        assert_eq!(course.title, "Intro to X");
        assert_eq!(course.details, "Lecture");
        assert_eq!(course.days, vec!["Monday", "Wednesday"]);
        assert_eq!(course.campus.as_deref(), Some("Main Campus"));
        assert_eq!(course.location.as_deref(), Some("Bldg 1"));
        assert_eq!(course.room.as_deref(), Some("Room 101"));
        assert!(course.is_exportable());

        // 01/06/2025 is already a Monday
        let start = course.start.unwrap();
        assert_eq!(start.day(), 6);
        assert_eq!(start.hour(), 9);
        let end = course.end.unwrap();
        assert_eq!(end.minute(), 50);
        assert!(course.until.is_some());
    }

    #[test]
    fn test_missing_header_marker_yields_nothing() {
        let mut rows = synthetic_table();
        rows.remove(0);
        assert!(assemble_courses(&rows).is_empty());
    }

    #[test]
    fn test_missing_footer_marker_yields_nothing() {
        let mut rows = synthetic_table();
        rows.pop();
        assert!(assemble_courses(&rows).is_empty());
    }

    #[test]
    fn test_footer_before_header_yields_nothing() {
        let mut rows = synthetic_table();
        rows.rotate_left(5); // footer now precedes the header marker
        assert!(assemble_courses(&rows).is_empty());
    }

    #[test]
    fn test_six_cell_header_concatenates_range() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 -", "04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 1);
        assert!(courses[0].until.is_some());
    }

    #[test]
    fn test_two_meeting_patterns_emit_two_courses() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Main Campus, Bldg 1, Room 101"]),
            row(&["Wednesday"]),
            row(&["2:00 PM - 3:15 PM"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].days, vec!["Monday"]);
        assert_eq!(courses[0].room.as_deref(), Some("Room 101"));
        assert_eq!(courses[1].days, vec!["Wednesday"]);
        assert!(courses[1].room.is_none());
        assert_eq!(courses[1].start.unwrap().hour(), 14);
    }

    #[test]
    fn test_date_range_continuation_starts_new_pattern() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["03/03/2025 - 04/25/2025"]),
            row(&["Friday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 2);

        // First pattern keeps the header's range
        assert_eq!(courses[0].start.unwrap().month(), 1);
        // Second pattern starts from the restated range: first Friday on
        // or after 03/03/2025 is 03/07
        assert_eq!(courses[1].start.unwrap().month(), 3);
        assert_eq!(courses[1].start.unwrap().day(), 7);
    }

    #[test]
    fn test_meeting_without_time_is_dropped() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["Main Campus, Bldg 1, Room 101"]),
            row(&["Total Hours"]),
        ];
        assert!(assemble_courses(&rows).is_empty());
    }

    #[test]
    fn test_location_with_embedded_comma_survives() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Main Campus, Arts, Sciences Bldg, Room 12"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].campus.as_deref(), Some("Main Campus"));
        assert_eq!(
            courses[0].location.as_deref(),
            Some("Arts, Sciences Bldg")
        );
        assert_eq!(courses[0].room.as_deref(), Some("Room 12"));
    }

    #[test]
    fn test_two_part_location_degrades_to_location_only() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Online Campus, *"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 1);
        assert!(courses[0].campus.is_none());
        assert!(courses[0].room.is_none());
        assert_eq!(courses[0].location.as_deref(), Some("Online Campus, *"));
    }

    #[test]
    fn test_instructor_row_is_ignored() {
        let mut rows = synthetic_table();
        rows.insert(5, row(&["Doe, Jane"]));
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].room.as_deref(), Some("Room 101"));
    }

    #[test]
    fn test_two_courses_back_to_back() {
        let rows = vec![
            row(&["Title"]),
            row(&["Intro to X", "Lecture", "", "12345", "01/06/2025 - 04/25/2025"]),
            row(&["Monday"]),
            row(&["9:00 AM - 9:50 AM"]),
            row(&["Advanced Y", "Seminar", "", "67890", "01/06/2025 - 04/25/2025"]),
            row(&["Tuesday, Thursday"]),
            row(&["1:00 PM - 2:15 PM"]),
            row(&["Total Hours"]),
        ];
        let courses = assemble_courses(&rows);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].crn, 12345);
        assert_eq!(courses[1].crn, 67890);
        assert_eq!(courses[1].days, vec!["Tuesday", "Thursday"]);
    }
}
