//! Same-date interval intersection.
//!
//! Ranges on different calendar dates never overlap. Within a date, an end
//! time at or before the start time (or `24:00`) is read as "until midnight",
//! so a `22:00-02:00` shift occupies `22:00-24:00` of its own date only.
//! A zero-length range such as `10:00-10:00` therefore blocks the rest of
//! the day.

use crate::time::{TimeRange, MINUTES_PER_DAY};

/// Start and end of a range in minutes since midnight, with the end-of-day
/// correction applied to the end.
pub fn span_minutes(range: &TimeRange) -> (u16, u16) {
    let start = range.start_time.minutes();
    let end = if range.runs_to_end_of_day() {
        MINUTES_PER_DAY
    } else {
        range.end_time.minutes()
    };
    (start, end)
}

/// Whether two ranges intersect.
///
/// Two ranges on the same date overlap when `a.start < b.end && b.start < a.end`.
/// Ranges that only touch (one ends exactly when the other starts) do NOT overlap.
pub fn overlaps(a: &TimeRange, b: &TimeRange) -> bool {
    if a.date != b.date {
        return false;
    }

    let (a_start, a_end) = span_minutes(a);
    let (b_start, b_end) = span_minutes(b);

    a_start < b_end && b_start < a_end
}

/// Length of the shared part of two ranges in minutes, zero when disjoint.
pub fn overlap_minutes(a: &TimeRange, b: &TimeRange) -> u16 {
    if !overlaps(a, b) {
        return 0;
    }
    let (a_start, a_end) = span_minutes(a);
    let (b_start, b_end) = span_minutes(b);
    a_end.min(b_end) - a_start.max(b_start)
}
