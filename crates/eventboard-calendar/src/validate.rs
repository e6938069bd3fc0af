//! Checks that an `events.json` file is usable by the loader.
//!
//! Errors make the file invalid; warnings are reported but do not.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::types::parse_timestamp;

const REQUIRED_FIELDS: [&str; 3] = ["title", "date", "location"];
const KNOWN_FIELDS: [&str; 4] = ["title", "date", "location", "link"];

/// A problem found in an event file, optionally tied to an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventIssue {
    pub index: Option<usize>,
    pub message: String,
}

impl fmt::Display for EventIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "Item {}: {}", index, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<EventIssue>,
    pub warnings: Vec<EventIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, index: Option<usize>, message: impl Into<String>) {
        self.errors.push(EventIssue {
            index,
            message: message.into(),
        });
    }

    fn warning(&mut self, index: Option<usize>, message: impl Into<String>) {
        self.warnings.push(EventIssue {
            index,
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate the file at `path`. A missing or unreadable file is an error.
pub fn validate_file(path: &Path) -> ValidationReport {
    match std::fs::read_to_string(path) {
        Ok(content) => validate_events_json(&content),
        Err(e) => {
            let mut report = ValidationReport::default();
            if e.kind() == std::io::ErrorKind::NotFound {
                report.error(None, format!("File '{}' not found", path.display()));
            } else {
                report.error(None, format!("Could not read '{}': {}", path.display(), e));
            }
            report
        }
    }
}

pub fn validate_events_json(content: &str) -> ValidationReport {
    let mut report = ValidationReport::default();

    let data: Value = match serde_json::from_str(content) {
        Ok(data) => data,
        Err(e) => {
            report.error(None, format!("Invalid JSON syntax: {}", e));
            return report;
        }
    };

    let Some(items) = data.as_array() else {
        report.error(
            None,
            format!("Root element should be an array, got {}", json_type(&data)),
        );
        return report;
    };

    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let Some(event) = item.as_object() else {
            report.error(
                Some(index),
                format!("Should be an object, got {}", json_type(item)),
            );
            continue;
        };

        check_event(&mut report, index, event);

        let title = event.get("title").and_then(Value::as_str).unwrap_or_default();
        let date = event.get("date").and_then(Value::as_str).unwrap_or_default();
        if !(title.is_empty() && date.is_empty()) && !seen.insert((title, date)) {
            report.warning(Some(index), "Duplicate event (same title and date)");
        }
    }

    report
}

fn check_event(report: &mut ValidationReport, index: usize, event: &Map<String, Value>) {
    let idx = Some(index);

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !event.contains_key(*field))
        .collect();
    if !missing.is_empty() {
        report.error(idx, format!("Missing required fields: {}", missing.join(", ")));
    }

    let mut extra: Vec<&str> = event
        .keys()
        .map(String::as_str)
        .filter(|key| !KNOWN_FIELDS.contains(key))
        .collect();
    if !extra.is_empty() {
        extra.sort_unstable();
        report.warning(idx, format!("Contains extra fields: {}", extra.join(", ")));
    }

    match event.get("title") {
        None => {}
        Some(Value::String(title)) if is_url(title) => {
            let preview: String = title.chars().take(50).collect();
            report.error(idx, format!("Title contains a URL instead of text: '{}'", preview));
        }
        Some(Value::String(title)) if title.trim().is_empty() => {
            report.error(idx, "Title is empty");
        }
        Some(Value::String(_)) => {}
        Some(_) => report.error(idx, "Title should be a string"),
    }

    match event.get("date") {
        None => {}
        Some(Value::String(date)) if parse_timestamp(date).is_none() => {
            report.error(
                idx,
                format!("Invalid date format '{}' (expected ISO 8601)", date),
            );
        }
        Some(Value::String(_)) => {}
        Some(_) => report.error(idx, "Date should be a string"),
    }

    match event.get("location") {
        None => {}
        Some(Value::String(location)) if location.trim().is_empty() => {
            report.warning(idx, "Location is empty");
        }
        Some(Value::String(_)) => {}
        Some(_) => report.error(idx, "Location should be a string"),
    }

    match event.get("link") {
        None | Some(Value::Null) => {}
        Some(Value::String(link)) if link.trim().is_empty() => {}
        Some(Value::String(link)) if !is_url(link) => {
            report.error(
                idx,
                format!("Link doesn't appear to be a valid URL: '{}'", link),
            );
        }
        Some(Value::String(_)) => {}
        Some(_) => report.error(idx, "Link should be a string"),
    }
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
