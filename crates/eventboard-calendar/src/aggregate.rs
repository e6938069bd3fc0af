//! Per-day event aggregation for a single month.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day_key::YearMonth;
use crate::types::Event;

/// Default hour splitting the before/after buckets (16:00).
pub const DEFAULT_THRESHOLD_HOUR: u32 = 16;

/// How events are summarized per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AggregationMode {
    /// A single "has event" flag per day.
    Flag,
    /// Split into events starting before and at-or-after `threshold_hour`.
    Bucketed { threshold_hour: u32 },
}

impl Default for AggregationMode {
    fn default() -> Self {
        Self::Bucketed {
            threshold_hour: DEFAULT_THRESHOLD_HOUR,
        }
    }
}

/// Summary of the events on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayBucket {
    HasEvent,
    Split {
        before_threshold: bool,
        after_threshold: bool,
    },
}

impl DayBucket {
    fn empty(mode: AggregationMode) -> Self {
        match mode {
            AggregationMode::Flag => Self::HasEvent,
            AggregationMode::Bucketed { .. } => Self::Split {
                before_threshold: false,
                after_threshold: false,
            },
        }
    }

    pub fn has_event(&self) -> bool {
        match self {
            Self::HasEvent => true,
            Self::Split {
                before_threshold,
                after_threshold,
            } => *before_threshold || *after_threshold,
        }
    }

    fn record(&mut self, hour: u32, mode: AggregationMode) {
        if let (
            Self::Split {
                before_threshold,
                after_threshold,
            },
            AggregationMode::Bucketed { threshold_hour },
        ) = (self, mode)
        {
            if hour < threshold_hour {
                *before_threshold = true;
            } else {
                *after_threshold = true;
            }
        }
    }
}

/// Day-of-month to bucket. Only days with at least one event are present.
pub type DayBuckets = BTreeMap<u32, DayBucket>;

/// Summarize the events falling in `month`, keyed by day of month.
///
/// Events outside the month are ignored. A missing key means no events on
/// that day.
pub fn aggregate(events: &[Event], month: YearMonth, mode: AggregationMode) -> DayBuckets {
    let mut buckets = DayBuckets::new();

    for event in events {
        let key = event.day_key();
        if !month.contains(key) {
            continue;
        }

        buckets
            .entry(key.day())
            .or_insert_with(|| DayBucket::empty(mode))
            .record(event.hour(), mode);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn event_at(s: &str) -> Event {
        let date = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();
        Event::new("Event", date, "Somewhere")
    }

    fn april() -> YearMonth {
        YearMonth::new(2024, 4).unwrap()
    }

    #[test]
    fn test_bucketed_split_around_threshold() {
        let events = vec![
            event_at("2024-04-05T10:00"),
            event_at("2024-04-05T18:00"),
            event_at("2024-04-20T09:00"),
        ];

        let buckets = aggregate(&events, april(), AggregationMode::default());

        assert_eq!(buckets.len(), 2);
        assert_eq!(
            buckets[&5],
            DayBucket::Split {
                before_threshold: true,
                after_threshold: true
            }
        );
        assert_eq!(
            buckets[&20],
            DayBucket::Split {
                before_threshold: true,
                after_threshold: false
            }
        );
    }

    #[test]
    fn test_threshold_hour_itself_counts_as_after() {
        let events = vec![event_at("2024-04-05T16:00")];
        let buckets = aggregate(&events, april(), AggregationMode::default());
        assert_eq!(
            buckets[&5],
            DayBucket::Split {
                before_threshold: false,
                after_threshold: true
            }
        );
    }

    #[test]
    fn test_custom_threshold() {
        let events = vec![event_at("2024-04-05T13:00")];
        let mode = AggregationMode::Bucketed { threshold_hour: 12 };
        let buckets = aggregate(&events, april(), mode);
        assert_eq!(
            buckets[&5],
            DayBucket::Split {
                before_threshold: false,
                after_threshold: true
            }
        );
    }

    #[test]
    fn test_flag_mode() {
        let events = vec![event_at("2024-04-05T10:00"), event_at("2024-04-05T18:00")];
        let buckets = aggregate(&events, april(), AggregationMode::Flag);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&5], DayBucket::HasEvent);
        assert!(buckets[&5].has_event());
    }

    #[test]
    fn test_other_months_are_ignored() {
        let events = vec![
            event_at("2024-03-05T10:00"),
            event_at("2025-04-05T10:00"),
            event_at("2024-05-01T00:00"),
        ];
        let buckets = aggregate(&events, april(), AggregationMode::default());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_no_entry_for_days_without_events() {
        let events = vec![event_at("2024-04-05T10:00")];
        let buckets = aggregate(&events, april(), AggregationMode::default());
        assert!(!buckets.contains_key(&6));
        assert!(buckets.values().all(DayBucket::has_event));
    }

    #[test]
    fn test_empty_input_and_idempotence() {
        assert!(aggregate(&[], april(), AggregationMode::default()).is_empty());

        let events = vec![event_at("2024-04-05T10:00"), event_at("2024-04-07T20:00")];
        let first = aggregate(&events, april(), AggregationMode::default());
        let second = aggregate(&events, april(), AggregationMode::default());
        assert_eq!(first, second);
    }
}
