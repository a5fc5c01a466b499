//! Recurring lines -- expand a line's recurrence rule into dated occurrences.
//!
//! A line is a recurring event slot ("Friday night event"). Its schedule is
//! an RFC 5545 RRULE anchored at the first date in the venue's timezone.
//! Expansion goes through the `rrule` crate; each instance becomes a
//! [`TimeRange`] on the instance's local date, which is what the collision
//! checks consume.

use chrono::NaiveDate;
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};

use crate::collision::{check_multiple_collisions, MultiCollisionCheck};
use crate::error::{Result, VenueError};
use crate::time::{TimeOfDay, TimeRange};

/// Upper bound on instances when neither `until` nor `count` limits expansion.
pub const DEFAULT_MAX_OCCURRENCES: u16 = 500;

/// A recurring event slot owned by a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    pub name: String,
    /// RRULE body without the `RRULE:` prefix, e.g. `FREQ=WEEKLY;BYDAY=FR`.
    pub rrule: String,
    pub start_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// IANA timezone of the venue, e.g. `Europe/Berlin`.
    pub timezone: String,
}

/// One concrete scheduled instance of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOccurrence {
    pub line_id: String,
    #[serde(flatten)]
    pub range: TimeRange,
}

/// Expand a line into its occurrences.
///
/// # Arguments
/// - `line` -- The line to expand
/// - `until` -- Optional last date (inclusive) to expand to
/// - `count` -- Optional maximum number of occurrences (overrides COUNT in the rule)
///
/// # Errors
/// Returns `VenueError::InvalidRule` if the rule is empty or unparseable.
/// Returns `VenueError::InvalidTimezone` if the timezone is not a valid IANA identifier.
/// Returns `VenueError::InvalidTimeFormat` if the line starts at `24:00`.
pub fn expand_line(
    line: &Line,
    until: Option<NaiveDate>,
    count: Option<u32>,
) -> Result<Vec<LineOccurrence>> {
    if line.rrule.trim().is_empty() {
        return Err(VenueError::InvalidRule("empty RRULE string".to_string()));
    }

    // Reject a bad start time before touching the rule.
    TimeRange::new(line.start_date, line.start_time, line.end_time)?;

    if count == Some(0) {
        return Ok(Vec::new());
    }

    let _tz: chrono_tz::Tz = line
        .timezone
        .parse()
        .map_err(|_| VenueError::InvalidTimezone(line.timezone.clone()))?;

    let mut rule = line.rrule.trim().to_string();

    if let Some(c) = count {
        if !rule.to_uppercase().contains("COUNT=") {
            rule = format!("{};COUNT={}", rule, c);
        }
    }

    // UNTIL must share DTSTART's timezone: bare local time, or `Z` for UTC.
    if let Some(last) = until {
        if !rule.to_uppercase().contains("UNTIL=") {
            let mut until_ical = format!("{}T235959", last.format("%Y%m%d"));
            if line.timezone == "UTC" {
                until_ical.push('Z');
            }
            rule = format!("{};UNTIL={}", rule, until_ical);
        }
    }

    let rrule_text = format!(
        "DTSTART;TZID={}:{}T{:02}{:02}00\nRRULE:{}",
        line.timezone,
        line.start_date.format("%Y%m%d"),
        line.start_time.hours(),
        line.start_time.minute_of_hour(),
        rule
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| VenueError::InvalidRule(format!("{}", e)))?;

    let limit = count
        .map(|c| u16::try_from(c).unwrap_or(u16::MAX))
        .unwrap_or(DEFAULT_MAX_OCCURRENCES);
    let instances = rrule_set.all(limit);

    let mut occurrences = instances
        .dates
        .into_iter()
        .map(|dt| {
            TimeRange::new(dt.date_naive(), line.start_time, line.end_time).map(|range| {
                LineOccurrence {
                    line_id: line.id.clone(),
                    range,
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(c) = count {
        occurrences.truncate(c as usize);
    }

    tracing::debug!(
        line = %line.id,
        occurrences = occurrences.len(),
        "expanded line"
    );

    Ok(occurrences)
}

/// Check a line's occurrences against already scheduled ranges and each other.
pub fn check_line_collisions(
    occurrences: &[LineOccurrence],
    existing: &[TimeRange],
) -> MultiCollisionCheck {
    let ranges: Vec<TimeRange> = occurrences.iter().map(|o| o.range.clone()).collect();
    check_multiple_collisions(&ranges, existing)
}
