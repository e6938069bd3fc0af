mod cli;
mod render;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use eventboard_calendar::{
    day_key_of, validate_file, CalendarError, EventBoard, EventLoader, EventSource, EventWindow,
    YearMonth,
};
use eventboard_core::{AppError, Config};

use crate::cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    eventboard_core::init()?;

    match run(cli).await {
        Ok(code) => Ok(code),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    match &cli.command {
        Some(Command::Validate { file }) => {
            let report = validate_file(file);
            print!("{}", render::render_report(&file.display().to_string(), &report));
            Ok(if report.is_valid() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(Command::Show) | None => show(&cli).await,
    }
}

async fn show(cli: &Cli) -> Result<ExitCode, AppError> {
    let (mut config, _) = Config::load_validated(cli.config.as_deref())?;
    if cli.apply_overrides(&mut config) {
        config.ensure_valid()?;
    }

    let source = EventSource::parse(&config.source.location)?;
    let loader =
        EventLoader::with_timeout(source, Duration::from_secs(config.source.timeout_secs))?;
    let board = EventBoard::load(
        &loader,
        config.calendar.aggregation_mode(),
        config.calendar.week_start,
    )
    .await;

    let now = Local::now().naive_local();
    let today = day_key_of(&now);
    let month = cli
        .month
        .unwrap_or_else(|| YearMonth::of(cli.day.unwrap_or(today)));
    let window = cli.day.map_or(EventWindow::Default, EventWindow::Selected);

    let grid = board.month_grid(month, Some(today));
    let events = board.select(&window, &now);
    tracing::debug!(
        "Showing {} of {} events for {:?}",
        events.len(),
        board.events().len(),
        window
    );

    if cli.json {
        let json = render::render_json(&grid, &window, &events, board.load_error())
            .map_err(CalendarError::from)?;
        println!("{}", json);
    } else {
        print!(
            "{}",
            render::render_board(&grid, board.mode(), &window, &events, board.load_error())
        );
    }

    Ok(ExitCode::SUCCESS)
}
