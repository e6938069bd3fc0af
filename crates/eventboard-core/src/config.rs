use eventboard_calendar::{AggregationMode, EventSource, WeekStart, DEFAULT_THRESHOLD_HOUR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable overriding the default event source.
pub const SOURCE_ENV_VAR: &str = "EVENTBOARD_SOURCE";

/// A single validation finding
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Where events are loaded from
    #[serde(default)]
    pub source: SourceConfig,

    /// Month grid and marker settings
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to `events.json` or an http(s) URL serving it
    #[serde(default = "default_source_location")]
    pub location: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_location() -> String {
    "events.json".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_source_location(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// How days with events are marked on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerMode {
    /// One marker for any event
    Flag,
    /// Separate markers for events before and after the threshold hour
    #[default]
    Bucketed,
}

impl std::str::FromStr for MarkerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" => Ok(Self::Flag),
            "bucketed" => Ok(Self::Bucketed),
            other => Err(ConfigError::Invalid(format!(
                "unknown marker mode '{}', expected flag or bucketed",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub mode: MarkerMode,

    /// Hour (0-23) splitting early and late events in bucketed mode
    #[serde(default = "default_threshold_hour")]
    pub threshold_hour: u32,

    #[serde(default)]
    pub week_start: WeekStart,
}

fn default_threshold_hour() -> u32 {
    DEFAULT_THRESHOLD_HOUR
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            mode: MarkerMode::default(),
            threshold_hour: default_threshold_hour(),
            week_start: WeekStart::default(),
        }
    }
}

impl CalendarConfig {
    pub fn aggregation_mode(&self) -> AggregationMode {
        match self.mode {
            MarkerMode::Flag => AggregationMode::Flag,
            MarkerMode::Bucketed => AggregationMode::Bucketed {
                threshold_hour: self.threshold_hour,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventboard");

        Self {
            config_dir,
            source: SourceConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration, apply `EVENTBOARD_SOURCE` and validate the result
    ///
    /// Warnings are logged. Returns an error if validation finds any errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult), ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_source_override(std::env::var(SOURCE_ENV_VAR).ok());
        let validation = config.ensure_valid()?;

        Ok((config, validation))
    }

    /// Replace the event source with `location` when one is given.
    ///
    /// The override is never written back to the config file.
    pub fn apply_source_override(&mut self, location: Option<String>) {
        if let Some(location) = location.filter(|l| !l.trim().is_empty()) {
            tracing::debug!("Event source overridden: {}", location);
            self.source.location = location;
        }
    }

    /// Validate, logging warnings and failing on any error
    pub fn ensure_valid(&self) -> Result<ValidationResult, ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_source(&mut result);

        if self.source.timeout_secs == 0 {
            result.add_error("source.timeout_secs", "Timeout must be greater than 0");
        }

        if self.calendar.threshold_hour > 23 {
            result.add_error(
                "calendar.threshold_hour",
                format!(
                    "Threshold hour must be between 0 and 23, got {}",
                    self.calendar.threshold_hour
                ),
            );
        } else if self.calendar.threshold_hour == 0 && self.calendar.mode == MarkerMode::Bucketed {
            result.add_warning(
                "calendar.threshold_hour",
                "Threshold hour 0 marks every event as late",
            );
        }

        result
    }

    fn validate_source(&self, result: &mut ValidationResult) {
        let field = "source.location";
        let location = self.source.location.trim();

        if location.is_empty() {
            result.add_error(field, "Event source must not be empty");
            return;
        }

        if location.contains("://") {
            match Url::parse(location) {
                Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
                    result.add_error(
                        field,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                Ok(url) if url.host().is_none() => {
                    result.add_error(field, "URL must have a host");
                }
                Ok(_) => {}
                Err(e) => result.add_error(field, format!("Invalid URL: {}", e)),
            }
            return;
        }

        if let Ok(EventSource::File(path)) = EventSource::parse(location) {
            if !path.exists() {
                result.add_warning(field, format!("File does not exist: {}", path.display()));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("eventboard");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_source(location: &str) -> Config {
        let mut config = Config::default();
        config.source.location = location.to_string();
        config
    }

    #[test]
    fn test_default_calendar_settings() {
        let config = Config::default();
        assert_eq!(config.calendar.mode, MarkerMode::Bucketed);
        assert_eq!(config.calendar.threshold_hour, 16);
        assert_eq!(config.calendar.week_start, WeekStart::Sunday);
        assert_eq!(
            config.calendar.aggregation_mode(),
            AggregationMode::Bucketed { threshold_hour: 16 }
        );
    }

    #[test]
    fn test_valid_remote_source() {
        let config = config_with_source("https://example.com/events.json");
        let result = config.validate();
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_url_scheme() {
        let result = config_with_source("ftp://example.com/events.json").validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_missing_file_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let result = config_with_source(&missing.to_string_lossy()).validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "source.location"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = config_with_source("https://example.com/events.json");
        config.calendar.threshold_hour = 24;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "calendar.threshold_hour"));

        config.calendar.threshold_hour = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "calendar.threshold_hour"));
    }

    #[test]
    fn test_marker_mode_parse() {
        assert_eq!("flag".parse::<MarkerMode>().unwrap(), MarkerMode::Flag);
        assert_eq!("Bucketed".parse::<MarkerMode>().unwrap(), MarkerMode::Bucketed);
        assert!("stripes".parse::<MarkerMode>().is_err());
    }

    #[test]
    fn test_flag_mode_ignores_threshold() {
        let mut config = Config::default();
        config.calendar.mode = MarkerMode::Flag;
        config.calendar.threshold_hour = 9;
        assert_eq!(config.calendar.aggregation_mode(), AggregationMode::Flag);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.source.location, config.source.location);
        assert_eq!(reloaded.calendar.threshold_hour, 16);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "config_dir = \"/tmp/eventboard\"\n\n[calendar]\nmode = \"flag\"\nweek_start = \"monday\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.calendar.mode, MarkerMode::Flag);
        assert_eq!(config.calendar.week_start, WeekStart::Monday);
        assert_eq!(config.calendar.threshold_hour, 16);
        assert_eq!(config.source.timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "calendar = [").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_default_source_ignores_environment() {
        assert_eq!(SourceConfig::default().location, "events.json");
    }

    #[test]
    fn test_source_override_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut first = Config::load_from(&path).unwrap();
        first.apply_source_override(Some("first.json".to_string()));
        assert_eq!(first.source.location, "first.json");

        let mut second = Config::load_from(&path).unwrap();
        assert_eq!(second.source.location, "events.json");
        second.apply_source_override(Some("https://example.com/second.json".to_string()));
        assert_eq!(second.source.location, "https://example.com/second.json");

        let mut third = Config::load_from(&path).unwrap();
        third.apply_source_override(None);
        third.apply_source_override(Some("  ".to_string()));
        assert_eq!(third.source.location, "events.json");
    }

    #[test]
    fn test_environment_source_applied_on_each_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::env::set_var(SOURCE_ENV_VAR, "https://example.com/first.json");
        let (first, _) = Config::load_validated(Some(&path)).unwrap();
        std::env::set_var(SOURCE_ENV_VAR, "https://example.com/second.json");
        let (second, _) = Config::load_validated(Some(&path)).unwrap();
        std::env::remove_var(SOURCE_ENV_VAR);

        assert_eq!(first.source.location, "https://example.com/first.json");
        assert_eq!(second.source.location, "https://example.com/second.json");

        let stored = Config::load_from(&path).unwrap();
        assert_eq!(stored.source.location, "events.json");
    }

    #[test]
    fn test_ensure_valid_rejects_bad_source() {
        let config = config_with_source("ftp://example.com/events.json");
        assert!(matches!(config.ensure_valid(), Err(ConfigError::Invalid(_))));

        let config = config_with_source("https://example.com/events.json");
        assert!(config.ensure_valid().is_ok());
    }

    #[test]
    fn test_load_validated_rejects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "config_dir = \"/tmp/eventboard\"\n\n[calendar]\nthreshold_hour = 30\n",
        )
        .unwrap();

        let result = Config::load_validated(Some(&path));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
