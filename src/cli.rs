use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eventboard_calendar::{DayKey, WeekStart, YearMonth};
use eventboard_core::{Config, MarkerMode};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "eventboard",
    version,
    about = "Month calendar and today/tomorrow listing for a small events.json"
)]
pub struct Cli {
    /// Use this config file instead of the one in the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path or http(s) URL of events.json
    #[arg(long)]
    pub source: Option<String>,

    /// Month to draw, as YYYY-MM (defaults to the selected day's month or the current one)
    #[arg(
        long,
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<YearMonth>())
    )]
    pub month: Option<YearMonth>,

    /// List events for this day (YYYY-MM-DD) instead of today and tomorrow
    #[arg(
        long,
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<DayKey>())
    )]
    pub day: Option<DayKey>,

    /// Day marker style: flag or bucketed
    #[arg(
        long,
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<MarkerMode>())
    )]
    pub mode: Option<MarkerMode>,

    /// Hour (0-23) separating early and late events in bucketed mode
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub threshold: Option<u32>,

    /// First column of the grid: sunday or monday
    #[arg(
        long,
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<WeekStart>())
    )]
    pub week_start: Option<WeekStart>,

    /// Print the grid and events as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the month grid and event cards (the default)
    Show,

    /// Check an events.json file for problems
    Validate {
        #[arg(default_value = "events.json")]
        file: PathBuf,
    },
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    ///
    /// Returns whether anything was overridden.
    pub fn apply_overrides(&self, config: &mut Config) -> bool {
        config.apply_source_override(self.source.clone());
        if let Some(mode) = self.mode {
            config.calendar.mode = mode;
        }
        if let Some(threshold) = self.threshold {
            config.calendar.threshold_hour = threshold;
        }
        if let Some(week_start) = self.week_start {
            config.calendar.week_start = week_start;
        }

        self.source.is_some()
            || self.mode.is_some()
            || self.threshold.is_some()
            || self.week_start.is_some()
    }
}
