//! Month grid construction.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::aggregate::{DayBucket, DayBuckets};
use crate::day_key::{DayKey, YearMonth};
use crate::error::CalendarError;

/// First column of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Two-letter weekday labels in column order.
    pub fn labels(&self) -> [&'static str; 7] {
        match self {
            Self::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            Self::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(Self::Sunday),
            "monday" | "mon" => Ok(Self::Monday),
            other => Err(CalendarError::InvalidDate(format!(
                "unknown week start '{}'",
                other
            ))),
        }
    }
}

/// One day square of the month page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day_number: u32,
    pub belongs_to_current_month: bool,
    pub is_today: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<DayBucket>,
}

impl GridCell {
    fn outside(day_number: u32) -> Self {
        Self {
            day_number,
            belongs_to_current_month: false,
            is_today: false,
            bucket: None,
        }
    }

    pub fn has_event(&self) -> bool {
        self.bucket.as_ref().is_some_and(DayBucket::has_event)
    }
}

/// A calendar page padded to whole weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: YearMonth,
    pub week_start: WeekStart,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Rows of seven cells.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }
}

/// Column (0..=6) of the first day of `month`.
pub fn first_weekday_of_month(month: YearMonth, week_start: WeekStart) -> u32 {
    let weekday = month.first_day().weekday();
    match week_start {
        WeekStart::Sunday => weekday.num_days_from_sunday(),
        WeekStart::Monday => weekday.num_days_from_monday(),
    }
}

/// Build the grid for `month`: trailing days of the previous month, every day
/// of `month` annotated from `buckets`, then leading days of the next month
/// until the last week is full.
pub fn build_grid(
    month: YearMonth,
    today: Option<DayKey>,
    buckets: &DayBuckets,
    week_start: WeekStart,
) -> MonthGrid {
    let first_weekday = first_weekday_of_month(month, week_start);
    let days_in_month = month.days_in_month();
    let days_in_prev_month = month.days_in_prev_month();
    let weeks_needed = (first_weekday + days_in_month).div_ceil(7);
    let total = (weeks_needed * 7) as usize;

    let mut cells = Vec::with_capacity(total);

    cells.extend(
        (days_in_prev_month - first_weekday + 1..=days_in_prev_month).map(GridCell::outside),
    );

    let today_in_month = today.filter(|t| month.contains(*t)).map(|t| t.day());
    cells.extend((1..=days_in_month).map(|day| GridCell {
        day_number: day,
        belongs_to_current_month: true,
        is_today: today_in_month == Some(day),
        bucket: buckets.get(&day).copied(),
    }));

    let trailing = total - cells.len();
    cells.extend((1..=trailing as u32).map(GridCell::outside));

    MonthGrid {
        month,
        week_start,
        cells,
    }
}
