//! Calendar-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Event source not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CalendarError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEventData(msg) => format!("Invalid event: {}", msg),
            Self::InvalidDate(input) => format!("'{}' is not a valid date", input),
            Self::NotFound(_) => "Could not find the events file.".to_string(),
            Self::ApiError(_) | Self::Network(_) | Self::Io(_) | Self::Parse(_) => {
                "Could not load events. Please try again later.".to_string()
            }
        }
    }

    /// Whether retrying the load could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
