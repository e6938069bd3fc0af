//! Event calendar engine for Eventboard.
//!
//! Normalizes event timestamps to calendar days, aggregates events per day,
//! builds padded month grids and selects the upcoming events to show.

pub mod aggregate;
pub mod board;
pub mod day_key;
pub mod error;
pub mod filter;
pub mod grid;
pub mod source;
pub mod types;
pub mod validate;

pub use aggregate::{aggregate, AggregationMode, DayBucket, DayBuckets, DEFAULT_THRESHOLD_HOUR};
pub use board::{EventBoard, LOAD_FAILED_MESSAGE};
pub use day_key::{day_key_of, same_day, DayKey, YearMonth};
pub use error::CalendarError;
pub use filter::{select_events, EventWindow};
pub use grid::{build_grid, GridCell, MonthGrid, WeekStart};
pub use source::{parse_events, EventLoader, EventSource};
pub use types::{parse_timestamp, ApiEvent, Event};
pub use validate::{validate_events_json, validate_file, EventIssue, ValidationReport};
