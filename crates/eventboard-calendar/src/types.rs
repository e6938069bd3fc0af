//! Event types and the `events.json` wire format.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::day_key::{day_key_of, DayKey};
use crate::error::CalendarError;

/// A scheduled event as shown on the board.
///
/// `date` is local wall-clock time. Events carry no identifier and are
/// ordered purely by `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    pub date: NaiveDateTime,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Event {
    pub fn new(title: impl Into<String>, date: NaiveDateTime, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date,
            location: location.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Calendar day this event falls on.
    pub fn day_key(&self) -> DayKey {
        day_key_of(&self.date)
    }

    /// Hour of day (0-23) the event starts at.
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }
}

/// One entry of an `events.json` array, before timestamp parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    pub link: Option<String>,
}

impl TryFrom<ApiEvent> for Event {
    type Error = CalendarError;

    fn try_from(api: ApiEvent) -> Result<Self, Self::Error> {
        let date = parse_timestamp(&api.date).ok_or_else(|| {
            CalendarError::InvalidEventData(format!(
                "unparseable date '{}' for '{}'",
                api.date, api.title
            ))
        })?;

        let link = api.link.filter(|l| !l.trim().is_empty());

        Ok(Self {
            title: api.title,
            date,
            location: api.location,
            link,
        })
    }
}

/// Parse an event timestamp into local wall-clock time.
///
/// Accepts RFC 3339 (converted to the local timezone), naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` taken as local, and a bare `YYYY-MM-DD`
/// meaning local midnight. Browsers read a bare date as UTC midnight instead,
/// which can shift it to the previous day west of UTC; keeping it local puts
/// the event on the day it names.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
