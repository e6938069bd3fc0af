//! Selection of the events to list as cards.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::day_key::{day_key_of, DayKey};
use crate::types::Event;

/// Which days' events to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "day", rename_all = "lowercase")]
pub enum EventWindow {
    /// Today and tomorrow, relative to "now".
    #[default]
    Default,
    /// A single day picked by the user.
    Selected(DayKey),
}

impl EventWindow {
    /// The calendar days covered by this window.
    pub fn days(&self, now: &NaiveDateTime) -> Vec<DayKey> {
        match self {
            Self::Default => {
                let today = day_key_of(now);
                std::iter::once(today).chain(today.next()).collect()
            }
            Self::Selected(day) => vec![*day],
        }
    }
}

/// Events falling inside `window`, ascending by date.
///
/// Events with identical timestamps keep their input order. An empty result
/// means there is nothing scheduled.
pub fn select_events(events: &[Event], window: &EventWindow, now: &NaiveDateTime) -> Vec<Event> {
    let days = window.days(now);

    let mut selected: Vec<Event> = events
        .iter()
        .filter(|event| days.contains(&event.day_key()))
        .cloned()
        .collect();

    selected.sort_by_key(|event| event.date);
    selected
}
