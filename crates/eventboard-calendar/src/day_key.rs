//! Calendar-day identity for timestamps.
//!
//! A [`DayKey`] is the (year, month, day) of a local wall-clock timestamp with
//! the time of day discarded. Two timestamps on the same local calendar day
//! always produce equal keys. Which day an instant belongs to depends on the
//! observer's timezone; events near midnight may land on different days for
//! observers in different zones and that case is left undefined.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Timezone-naive calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, `None` only at the end of chrono's range.
    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CalendarError::InvalidDate(s.to_string()))
    }
}

/// Calendar day of a timestamp, time of day discarded.
pub fn day_key_of(timestamp: &NaiveDateTime) -> DayKey {
    DayKey(timestamp.date())
}

/// Whether two timestamps fall on the same calendar day.
pub fn same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    day_key_of(a) == day_key_of(b)
}

/// A validated (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
    #[serde(skip)]
    first: NaiveDate,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { year, month, first })
    }

    pub fn of(day: DayKey) -> Self {
        let first = day.0.with_day(1).unwrap_or(day.0);
        Self {
            year: first.year(),
            month: first.month(),
            first,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn contains(&self, day: DayKey) -> bool {
        day.year() == self.year && day.month() == self.month
    }

    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn days_in_month(&self) -> u32 {
        match self.next() {
            Some(next) => (next.first - self.first).num_days() as u32,
            None => 31,
        }
    }

    /// Number of days in the month before this one.
    pub fn days_in_prev_month(&self) -> u32 {
        self.first.pred_opt().map(|d| d.day()).unwrap_or(31)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDate(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}
