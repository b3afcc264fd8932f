//! Weekday name recognition and RFC5545 BYDAY codes.

use chrono::Weekday;

/// The seven full English weekday names, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Parse a full English weekday name (case-sensitive)
#[must_use = "returns the parsed weekday if the name is recognized"]
pub fn from_full_name(name: &str) -> Option<Weekday> {
    match name {
        "Sunday" => Some(Weekday::Sun),
        "Monday" => Some(Weekday::Mon),
        "Tuesday" => Some(Weekday::Tue),
        "Wednesday" => Some(Weekday::Wed),
        "Thursday" => Some(Weekday::Thu),
        "Friday" => Some(Weekday::Fri),
        "Saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

/// True if `name` is one of the seven full English weekday names
#[inline]
#[must_use]
pub fn is_full_name(name: &str) -> bool {
    from_full_name(name).is_some()
}

/// Two-letter RFC5545 BYDAY code for a weekday
#[must_use]
pub const fn byday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}
