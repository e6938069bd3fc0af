//! Loading the event list from a local file or over HTTP.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::instrument;
use url::Url;

use crate::error::CalendarError;
use crate::types::{ApiEvent, Event};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where `events.json` lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSource {
    Remote(Url),
    File(PathBuf),
}

impl EventSource {
    /// `http(s)://` locations are fetched, everything else is a file path.
    pub fn parse(location: &str) -> Result<Self, CalendarError> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location)
                .map_err(|e| CalendarError::ApiError(format!("invalid URL {}: {}", location, e)))?;
            Ok(Self::Remote(url))
        } else {
            Ok(Self::File(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct EventLoader {
    client: reqwest::Client,
    source: EventSource,
}

impl EventLoader {
    pub fn new(source: EventSource) -> Result<Self, CalendarError> {
        Self::with_timeout(source, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(source: EventSource, timeout: Duration) -> Result<Self, CalendarError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, source })
    }

    pub fn source(&self) -> &EventSource {
        &self.source
    }

    /// Load and parse the event list.
    #[instrument(skip(self), fields(source = %self.source), level = "info")]
    pub async fn load_events(&self) -> Result<Vec<Event>, CalendarError> {
        let body = match &self.source {
            EventSource::Remote(url) => self.fetch_remote(url).await?,
            EventSource::File(path) => read_file(path).await?,
        };

        let events = parse_events(&body)?;
        tracing::info!("Loaded {} events", events.len());
        Ok(events)
    }

    async fn fetch_remote(&self, url: &Url) -> Result<String, CalendarError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else if status.as_u16() == 404 {
            Err(CalendarError::NotFound(url.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

async fn read_file(path: &Path) -> Result<String, CalendarError> {
    match tokio::fs::read_to_string(path).await {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CalendarError::NotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse an `events.json` array.
///
/// Entries that are not event objects, have mistyped fields or carry a date
/// that cannot be parsed are skipped with a warning; a body that is not a JSON
/// array is an error.
pub fn parse_events(body: &str) -> Result<Vec<Event>, CalendarError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(body)?;

    let events = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match parse_entry(value) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!("Skipping event {}: {}", index, e);
                None
            }
        })
        .collect();

    Ok(events)
}

fn parse_entry(value: serde_json::Value) -> Result<Event, CalendarError> {
    let api: ApiEvent = serde_json::from_value(value)?;
    Event::try_from(api)
}
