//! Wall-clock times and single-date time ranges.
//!
//! Times are `HH:MM` on a 24-hour clock. `24:00` is accepted as an end time
//! and means end of day. Parsing is strict: anything else is rejected with
//! [`VenueError::InvalidTimeFormat`] rather than carried along as a value
//! that never compares as overlapping.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VenueError};

/// Minutes in a day; the value of `24:00`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A wall-clock time stored as minutes since midnight, `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Build a time from hours and minutes. `24:00` is the only value past `23:59`.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self> {
        let valid = (hours < 24 && minutes < 60) || (hours == 24 && minutes == 0);
        if !valid {
            return Err(VenueError::InvalidTimeFormat(format!(
                "{:02}:{:02}",
                hours, minutes
            )));
        }
        Ok(TimeOfDay(hours * 60 + minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hours(self) -> u16 {
        self.0 / 60
    }

    pub fn minute_of_hour(self) -> u16 {
        self.0 % 60
    }

    pub fn is_end_of_day(self) -> bool {
        self.0 == MINUTES_PER_DAY
    }
}

impl FromStr for TimeOfDay {
    type Err = VenueError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || VenueError::InvalidTimeFormat(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        TimeOfDay::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minute_of_hour())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = VenueError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| VenueError::InvalidDate(s.to_string()))
}

/// A contiguous interval on one calendar date.
///
/// An `end_time` that is not strictly later than `start_time` (or is `24:00`)
/// means the range runs until the end of `date`. It never spills into the
/// following date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimeRange")]
pub struct TimeRange {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl TimeRange {
    /// Build a range, rejecting `24:00` as a start time.
    pub fn new(date: NaiveDate, start_time: TimeOfDay, end_time: TimeOfDay) -> Result<Self> {
        if start_time.is_end_of_day() {
            return Err(VenueError::InvalidTimeFormat(format!(
                "{} is not a valid start time",
                start_time
            )));
        }
        Ok(TimeRange {
            date,
            start_time,
            end_time,
        })
    }

    /// Parse a range from its `YYYY-MM-DD`, `HH:MM`, `HH:MM` string parts.
    pub fn parse(date: &str, start_time: &str, end_time: &str) -> Result<Self> {
        TimeRange::new(parse_date(date)?, start_time.parse()?, end_time.parse()?)
    }

    /// Whether the end time wraps to end of day.
    pub fn runs_to_end_of_day(&self) -> bool {
        self.end_time.is_end_of_day() || self.end_time <= self.start_time
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.date, self.start_time, self.end_time)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeRange {
    date: String,
    start_time: String,
    end_time: String,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = VenueError;

    fn try_from(raw: RawTimeRange) -> Result<Self> {
        TimeRange::parse(&raw.date, &raw.start_time, &raw.end_time)
    }
}
