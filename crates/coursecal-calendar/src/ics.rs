//! RFC5545 text serialization.
//!
//! Renders [`CalendarAttributes`] and [`EventAttributes`] into an
//! iCalendar payload: CRLF line endings, 75-octet line folding, and text
//! escaping per RFC5545 §3.3.11. The serializer either returns the full
//! payload or an error; a failed serialization produces no partial output
//! and is never retried.

use crate::error::{CalendarError, Result};
use crate::event::{CalendarAttributes, DateTimeComponents, EventAttributes, TimestampMode};
use chrono::Utc;

/// Maximum content line length in octets before folding
const FOLD_WIDTH: usize = 75;

/// Serialize a calendar with its events to iCalendar text.
///
/// # Errors
///
/// Returns [`CalendarError::NoEvents`] for an empty event list and
/// [`CalendarError::InvalidEvent`] if an event carries out-of-range
/// date/time components.
pub fn serialize_calendar(
    calendar: &CalendarAttributes,
    events: &[EventAttributes],
) -> Result<String> {
    if events.is_empty() {
        return Err(CalendarError::NoEvents);
    }
    for event in events {
        validate_components(event, event.start)?;
        validate_components(event, event.end)?;
    }

    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let mut lines = Vec::new();
    lines.push("BEGIN:VCALENDAR".to_string());
    lines.push("VERSION:2.0".to_string());
    lines.push("CALSCALE:GREGORIAN".to_string());
    lines.push(format!("PRODID:{}", calendar.product_id));
    lines.push(format!("METHOD:{}", calendar.method));
    lines.push(format!("X-WR-CALNAME:{}", escape_text(&calendar.cal_name)));

    for (index, event) in events.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@coursecal", index + 1, dtstamp));
        lines.push(format!("DTSTAMP:{dtstamp}"));
        lines.push(format!(
            "DTSTART:{}",
            format_components(event.start, event.start_output_type)
        ));
        lines.push(format!(
            "DTEND:{}",
            format_components(event.end, event.end_output_type)
        ));
        lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
        if !event.description.is_empty() {
            lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
        }
        if let Some(location) = &event.location {
            lines.push(format!("LOCATION:{}", escape_text(location)));
        }
        lines.push(format!("RRULE:{}", event.recurrence_rule));
        lines.push(format!("TRANSP:{}", event.transp));
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in lines {
        for folded in fold_line(&line) {
            out.push_str(&folded);
            out.push_str("\r\n");
        }
    }
    Ok(out)
}

/// Render `[y, m, d, h, min]` in basic format, with a `Z` suffix for UTC
fn format_components(c: DateTimeComponents, output: TimestampMode) -> String {
    let suffix = match output {
        TimestampMode::Utc => "Z",
        TimestampMode::Local => "",
    };
    format!(
        "{:04}{:02}{:02}T{:02}{:02}00{}",
        c[0], c[1], c[2], c[3], c[4], suffix
    )
}

fn validate_components(event: &EventAttributes, c: DateTimeComponents) -> Result<()> {
    let [_, month, day, hour, minute] = c;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return Err(CalendarError::invalid_event(
            &event.title,
            format!("date/time components out of range: {c:?}"),
        ));
    }
    Ok(())
}

/// Escape text values per RFC5545 §3.3.11
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Fold a content line at 75 octets; continuation lines start with a space
fn fold_line(line: &str) -> Vec<String> {
    if line.len() <= FOLD_WIDTH {
        return vec![line.to_string()];
    }
    let mut parts = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        // continuation space counts against the limit
        if current.len() + ch.len_utf8() > FOLD_WIDTH {
            parts.push(std::mem::take(&mut current));
            current.push(' ');
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{CalendarAttributes, EventAttributes, TimestampMode};
    use std::io::BufReader;

    fn event() -> EventAttributes {
        EventAttributes {
            title: "Intro to X".to_string(),
            description: "Lecture".to_string(),
            start: [2025, 1, 6, 14, 0],
            start_input_type: TimestampMode::Utc,
            start_output_type: TimestampMode::Utc,
            end: [2025, 1, 6, 14, 50],
            end_input_type: TimestampMode::Utc,
            end_output_type: TimestampMode::Utc,
            location: Some("Bldg 1, Room 101".to_string()),
            recurrence_rule: "FREQ=WEEKLY;BYDAY=MO,WE;INTERVAL=1;UNTIL=20250426T035959Z"
                .to_string(),
            transp: "OPAQUE",
        }
    }

    #[test]
    fn test_empty_event_list_is_an_error() {
        let calendar = CalendarAttributes::new("Class Schedule");
        assert!(matches!(
            serialize_calendar(&calendar, &[]),
            Err(CalendarError::NoEvents)
        ));
    }

    #[test]
    fn test_out_of_range_components_rejected() {
        let calendar = CalendarAttributes::new("Class Schedule");
        let mut bad = event();
        bad.start[1] = 13;
        assert!(matches!(
            serialize_calendar(&calendar, &[bad]),
            Err(CalendarError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_serialized_payload_structure() {
        let calendar = CalendarAttributes::new("Class Schedule");
        let ics = serialize_calendar(&calendar, &[event()]).unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("METHOD:PUBLISH\r\n"));
        assert!(ics.contains("DTSTART:20250106T140000Z\r\n"));
        assert!(ics.contains("DTEND:20250106T145000Z\r\n"));
        assert!(ics.contains("LOCATION:Bldg 1\\, Room 101\r\n"));
        assert!(ics.contains("TRANSP:OPAQUE\r\n"));
    }

    #[test]
    fn test_local_output_has_no_utc_suffix() {
        let calendar = CalendarAttributes::new("Class Schedule");
        let mut local = event();
        local.start_output_type = TimestampMode::Local;
        local.start = [2025, 1, 6, 9, 0];
        let ics = serialize_calendar(&calendar, &[local]).unwrap();
        assert!(ics.contains("DTSTART:20250106T090000\r\n"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn test_fold_long_lines() {
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        let folded = fold_line(&line);
        assert!(folded.len() > 1);
        assert!(folded.iter().all(|l| l.len() <= FOLD_WIDTH));
        assert!(folded[1].starts_with(' '));
        let unfolded: String = folded
            .iter()
            .enumerate()
            .map(|(i, l)| if i == 0 { l.as_str() } else { &l[1..] })
            .collect();
        assert_eq!(unfolded, line);
    }

    #[test]
    fn test_round_trip_through_ical_parser() {
        let calendar = CalendarAttributes::new("Class Schedule");
        let ics = serialize_calendar(&calendar, &[event()]).unwrap();

        let parsed: Vec<_> = ical::IcalParser::new(BufReader::new(ics.as_bytes()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].events.len(), 1);

        let parsed_event = &parsed[0].events[0];
        let property = |name: &str| {
            parsed_event
                .properties
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.value.clone())
        };
        assert_eq!(property("SUMMARY").as_deref(), Some("Intro to X"));
        assert_eq!(
            property("RRULE").as_deref(),
            Some("FREQ=WEEKLY;BYDAY=MO,WE;INTERVAL=1;UNTIL=20250426T035959Z")
        );
        assert_eq!(property("DTSTART").as_deref(), Some("20250106T140000Z"));
    }
}
