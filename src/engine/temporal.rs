//! Past/future classification of competition dates.

use chrono::NaiveDateTime;

use crate::types::DATE_FORMAT;

/// Returns true when `date` parses as [`DATE_FORMAT`] and is strictly
/// before `now`. A competition starting at the exact current instant is
/// not yet past.
///
/// Parse failures return `false`: a malformed date is treated as not-past
/// so a data-entry error never blocks an otherwise valid booking. This is
/// deliberately fail-open and debatable; a stricter policy would refuse to
/// book against a date it cannot read.
pub fn is_past(date: &str, now: NaiveDateTime) -> bool {
    match NaiveDateTime::parse_from_str(date, DATE_FORMAT) {
        Ok(start) => start < now,
        Err(_) => false,
    }
}
