//! Immutable snapshot of the loaded events.
//!
//! The board is loaded once. Every grid and selection is computed from the
//! same snapshot, so picking a different day re-filters without fetching.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::aggregate::{aggregate, AggregationMode, DayBuckets};
use crate::day_key::{DayKey, YearMonth};
use crate::filter::{select_events, EventWindow};
use crate::grid::{build_grid, MonthGrid, WeekStart};
use crate::source::EventLoader;
use crate::types::Event;

/// Shown in place of the event list when the initial load failed.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load events. Please try again later.";

#[derive(Debug, Clone)]
pub struct EventBoard {
    events: Arc<[Event]>,
    mode: AggregationMode,
    week_start: WeekStart,
    load_error: Option<String>,
}

impl EventBoard {
    pub fn new(events: Vec<Event>, mode: AggregationMode, week_start: WeekStart) -> Self {
        Self {
            events: events.into(),
            mode,
            week_start,
            load_error: None,
        }
    }

    /// Load from `loader`, falling back to an empty board when loading fails.
    pub async fn load(loader: &EventLoader, mode: AggregationMode, week_start: WeekStart) -> Self {
        match loader.load_events().await {
            Ok(events) => Self::new(events, mode, week_start),
            Err(e) => {
                tracing::error!(
                    retryable = e.is_retryable(),
                    "Error fetching events from {}: {}",
                    loader.source(),
                    e
                );
                Self {
                    load_error: Some(LOAD_FAILED_MESSAGE.to_string()),
                    ..Self::new(Vec::new(), mode, week_start)
                }
            }
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    /// User-facing message when the initial load failed.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn day_buckets(&self, month: YearMonth) -> DayBuckets {
        aggregate(&self.events, month, self.mode)
    }

    pub fn month_grid(&self, month: YearMonth, today: Option<DayKey>) -> MonthGrid {
        build_grid(month, today, &self.day_buckets(month), self.week_start)
    }

    /// Days of `month` that carry at least one event.
    pub fn marked_days(&self, month: YearMonth) -> Vec<DayKey> {
        self.day_buckets(month)
            .keys()
            .filter_map(|day| DayKey::new(month.year(), month.month(), *day))
            .collect()
    }

    pub fn select(&self, window: &EventWindow, now: &NaiveDateTime) -> Vec<Event> {
        select_events(&self.events, window, now)
    }

    /// Today's and tomorrow's events.
    pub fn upcoming(&self, now: &NaiveDateTime) -> Vec<Event> {
        self.select(&EventWindow::Default, now)
    }

    /// Events on a day picked by the user.
    pub fn select_day(&self, day: DayKey, now: &NaiveDateTime) -> Vec<Event> {
        self.select(&EventWindow::Selected(day), now)
    }
}
