//! Tests for same-date time-range overlap.

use venue_engine::overlap::{overlap_minutes, span_minutes};
use venue_engine::{overlaps, TimeRange};

/// Helper to build a range from string parts.
fn range(date: &str, start: &str, end: &str) -> TimeRange {
    TimeRange::parse(date, start, end).unwrap()
}

#[test]
fn different_dates_never_overlap() {
    let a = range("2025-01-01", "10:00", "12:00");
    let b = range("2025-01-02", "10:00", "12:00");

    assert!(!overlaps(&a, &b), "identical times on different dates must not overlap");
}

#[test]
fn late_range_does_not_reach_into_next_date() {
    // 22:00-02:00 on Jan 1 runs to midnight of Jan 1 only.
    let night = range("2025-01-01", "22:00", "02:00");
    let early = range("2025-01-02", "00:00", "01:00");

    assert!(!overlaps(&night, &early));
}

#[test]
fn touching_ranges_do_not_overlap() {
    let a = range("2025-01-01", "10:00", "11:00");
    let b = range("2025-01-01", "11:00", "12:00");

    assert!(!overlaps(&a, &b), "a range ending when another starts is not a collision");
    assert!(!overlaps(&b, &a));
}

#[test]
fn contained_range_overlaps() {
    let a = range("2025-01-01", "10:00", "11:00");
    let b = range("2025-01-01", "10:30", "10:45");

    assert!(overlaps(&a, &b));
    assert!(overlaps(&b, &a));
    assert_eq!(overlap_minutes(&a, &b), 15);
}

#[test]
fn wrapped_end_runs_to_midnight() {
    // 22:00-02:00 is read as 22:00-24:00.
    let night = range("2025-01-01", "22:00", "02:00");
    assert_eq!(span_minutes(&night), (1320, 1440));

    let late = range("2025-01-01", "23:30", "23:45");
    assert!(overlaps(&night, &late));

    let afternoon = range("2025-01-01", "13:00", "14:00");
    assert!(!overlaps(&night, &afternoon), "the wrapped part never covers the early hours");
}

#[test]
fn end_of_day_sentinel() {
    let a = range("2025-01-01", "20:00", "24:00");
    assert_eq!(span_minutes(&a), (1200, 1440));

    let b = range("2025-01-01", "23:59", "24:00");
    assert!(overlaps(&a, &b));
}

#[test]
fn zero_length_range_blocks_rest_of_day() {
    // start == end is treated as running until midnight, not as empty.
    let zero = range("2025-01-01", "10:00", "10:00");
    assert_eq!(span_minutes(&zero), (600, 1440));

    let evening = range("2025-01-01", "18:00", "19:00");
    assert!(overlaps(&zero, &evening));

    let morning = range("2025-01-01", "09:00", "10:00");
    assert!(!overlaps(&zero, &morning));
}

#[test]
fn same_hour_earlier_minute_wraps() {
    // 10:30-10:15: end hour equals start hour and end minute is earlier.
    let a = range("2025-01-01", "10:30", "10:15");
    assert_eq!(span_minutes(&a), (630, 1440));
}

#[test]
fn disjoint_ranges_have_no_overlap_minutes() {
    let a = range("2025-01-01", "08:00", "09:00");
    let b = range("2025-01-01", "12:00", "13:00");

    assert_eq!(overlap_minutes(&a, &b), 0);
}
