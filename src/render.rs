//! Text and JSON output for the board.

use chrono::{NaiveDate, NaiveDateTime};
use eventboard_calendar::{
    AggregationMode, DayBucket, Event, EventWindow, GridCell, MonthGrid, ValidationReport,
};
use serde::Serialize;

const CELL_WIDTH: usize = 5;

/// Shown when the default window has no events.
pub const NO_UPCOMING_EVENTS: &str = "No events scheduled for today or tomorrow.";

/// Card time, e.g. "Friday 6:30 PM".
pub fn format_event_date(date: &NaiveDateTime) -> String {
    date.format("%A %-I:%M %p").to_string()
}

fn format_day(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

fn marker(bucket: Option<&DayBucket>) -> char {
    match bucket {
        Some(DayBucket::HasEvent) => '*',
        Some(DayBucket::Split {
            before_threshold: true,
            after_threshold: true,
        }) => '+',
        Some(DayBucket::Split {
            before_threshold: true,
            ..
        }) => '<',
        Some(DayBucket::Split {
            after_threshold: true,
            ..
        }) => '>',
        _ => ' ',
    }
}

fn render_cell(cell: &GridCell) -> String {
    if !cell.belongs_to_current_month {
        return format!("{:>3}  ", '.');
    }
    let (open, close) = if cell.is_today { ('[', ']') } else { (' ', ' ') };
    format!(
        "{}{:>2}{}{}",
        open,
        cell.day_number,
        marker(cell.bucket.as_ref()),
        close
    )
}

/// Seven-column month page with a legend for the marker style.
pub fn render_grid(grid: &MonthGrid, mode: AggregationMode) -> String {
    let width = CELL_WIDTH * 7;
    let mut lines = vec![format!("{:^width$}", grid.month.to_string(), width = width)];

    lines.push(
        grid.week_start
            .labels()
            .iter()
            .map(|label| format!(" {:<4}", label))
            .collect(),
    );

    for week in grid.weeks() {
        lines.push(week.iter().map(render_cell).collect());
    }

    let legend = match mode {
        AggregationMode::Flag => "* events   [ ] today".to_string(),
        AggregationMode::Bucketed { threshold_hour } => format!(
            "< before {h}:00   > from {h}:00   + both   [ ] today",
            h = threshold_hour
        ),
    };
    lines.push(String::new());
    lines.push(legend);

    let mut out: String = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

/// Message shown when `window` has no events.
pub fn empty_message(window: &EventWindow) -> String {
    match window {
        EventWindow::Default => NO_UPCOMING_EVENTS.to_string(),
        EventWindow::Selected(day) => {
            format!("No events scheduled for {}.", format_day(day.date()))
        }
    }
}

fn heading(window: &EventWindow) -> String {
    match window {
        EventWindow::Default => "Today and tomorrow".to_string(),
        EventWindow::Selected(day) => format!("Events on {}", format_day(day.date())),
    }
}

pub fn render_card(event: &Event) -> String {
    let mut card = format!(
        "{}\n  When: {}\n  Where: {}\n",
        event.title,
        format_event_date(&event.date),
        event.location
    );
    if let Some(link) = &event.link {
        card.push_str(&format!("  Link: {}\n", link));
    }
    card
}

/// Cards for the selected events, or the placeholder when there are none.
pub fn render_cards(events: &[Event], window: &EventWindow) -> String {
    let mut out = format!("{}\n\n", heading(window));
    if events.is_empty() {
        out.push_str(&empty_message(window));
        out.push('\n');
        return out;
    }

    let cards: Vec<String> = events.iter().map(render_card).collect();
    out.push_str(&cards.join("\n"));
    out
}

/// Grid followed by the cards, or the load failure message in place of cards.
pub fn render_board(
    grid: &MonthGrid,
    mode: AggregationMode,
    window: &EventWindow,
    events: &[Event],
    load_error: Option<&str>,
) -> String {
    let mut out = render_grid(grid, mode);
    out.push('\n');
    match load_error {
        Some(message) => {
            out.push_str(message);
            out.push('\n');
        }
        None => out.push_str(&render_cards(events, window)),
    }
    out
}

#[derive(Serialize)]
struct BoardView<'a> {
    grid: &'a MonthGrid,
    window: &'a EventWindow,
    events: &'a [Event],
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<&'a str>,
}

pub fn render_json(
    grid: &MonthGrid,
    window: &EventWindow,
    events: &[Event],
    load_error: Option<&str>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&BoardView {
        grid,
        window,
        events,
        load_error,
    })
}

/// Human-readable validator output.
pub fn render_report(file: &str, report: &ValidationReport) -> String {
    let mut out = format!("Validating {}\n", file);

    if report.errors.is_empty() && report.warnings.is_empty() {
        out.push_str("No issues found.\n");
    }
    for issue in &report.errors {
        out.push_str(&format!("  error: {}\n", issue));
    }
    for issue in &report.warnings {
        out.push_str(&format!("  warning: {}\n", issue));
    }

    if report.is_valid() {
        out.push_str(&format!("{} is valid.\n", file));
    } else {
        out.push_str(&format!("{} is NOT valid. Fix the errors above.\n", file));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventboard_calendar::{
        aggregate, build_grid, validate_events_json, DayBuckets, DayKey, WeekStart, YearMonth,
    };

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn sample_events() -> Vec<Event> {
        vec![
            Event::new("Brunch", ts("2024-04-05T10:00"), "Cafe"),
            Event::new("Late show", ts("2024-04-05T18:30"), "Theatre")
                .with_link("https://example.com/show"),
            Event::new("Market", ts("2024-04-20T09:00"), "Square"),
        ]
    }

    fn april_grid(mode: AggregationMode) -> MonthGrid {
        let april = YearMonth::new(2024, 4).unwrap();
        let buckets = aggregate(&sample_events(), april, mode);
        build_grid(april, DayKey::new(2024, 4, 5), &buckets, WeekStart::Sunday)
    }

    #[test]
    fn test_format_event_date() {
        assert_eq!(format_event_date(&ts("2024-04-05T10:00")), "Friday 10:00 AM");
        assert_eq!(format_event_date(&ts("2024-04-05T18:30")), "Friday 6:30 PM");
        assert_eq!(format_event_date(&ts("2024-04-06T00:05")), "Saturday 12:05 AM");
    }

    #[test]
    fn test_render_grid_bucketed() {
        let out = render_grid(&april_grid(AggregationMode::default()), AggregationMode::default());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0].trim(), "April 2024");
        assert_eq!(lines[1], " Su   Mo   Tu   We   Th   Fr   Sa");
        assert_eq!(lines[2], "  .    1    2    3    4  [ 5+]  6");
        assert!(lines[4].ends_with(" 20<"));
        assert!(out.contains("< before 16:00"));
        // Title, weekday row, five weeks, blank line, legend.
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_render_grid_flag() {
        let out = render_grid(&april_grid(AggregationMode::Flag), AggregationMode::Flag);
        assert!(out.contains("[ 5*]"));
        assert!(out.contains(" 20*"));
        assert!(out.contains("* events"));
    }

    #[test]
    fn test_render_cards() {
        let events = sample_events();
        let out = render_cards(&events[..2], &EventWindow::Default);

        assert!(out.starts_with("Today and tomorrow\n\n"));
        assert!(out.contains("Brunch\n  When: Friday 10:00 AM\n  Where: Cafe\n"));
        assert!(out.contains("  Link: https://example.com/show\n"));
        assert!(out.find("Brunch").unwrap() < out.find("Late show").unwrap());
    }

    #[test]
    fn test_empty_placeholders() {
        let out = render_cards(&[], &EventWindow::Default);
        assert!(out.ends_with("No events scheduled for today or tomorrow.\n"));

        let window = EventWindow::Selected(DayKey::new(2024, 4, 20).unwrap());
        assert_eq!(
            empty_message(&window),
            "No events scheduled for Saturday, April 20."
        );
    }

    #[test]
    fn test_board_with_load_error() {
        let april = YearMonth::new(2024, 4).unwrap();
        let grid = build_grid(april, None, &DayBuckets::new(), WeekStart::Sunday);
        let out = render_board(
            &grid,
            AggregationMode::default(),
            &EventWindow::Default,
            &[],
            Some("Could not load events. Please try again later."),
        );

        assert!(out.ends_with("Could not load events. Please try again later.\n"));
        assert!(!out.contains(NO_UPCOMING_EVENTS));
    }

    #[test]
    fn test_render_json() {
        let grid = april_grid(AggregationMode::default());
        let events = sample_events();
        let json = render_json(&grid, &EventWindow::Default, &events[..1], None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["grid"]["cells"].as_array().unwrap().len(), 35);
        assert_eq!(value["grid"]["month"]["month"], 4);
        assert_eq!(value["window"]["kind"], "default");
        assert_eq!(value["events"][0]["title"], "Brunch");
        assert!(value.get("load_error").is_none());
    }

    #[test]
    fn test_render_report() {
        let report = validate_events_json(r#"[{"title": "", "date": "2024-04-05", "location": "Hall"}]"#);
        let out = render_report("events.json", &report);
        assert!(out.contains("  error: Item 0: Title is empty"));
        assert!(out.ends_with("events.json is NOT valid. Fix the errors above.\n"));
    }
}
