//! Terminal rendering for staycal types.
//!
//! Extension traits that add colored output to staycal-core types using
//! owo_colors. Colors are only emitted when stdout supports them.

use std::fmt::Display;

use chrono::Datelike;
use owo_colors::{OwoColorize, Stream, Style};
use staycal_core::DateRange;
use staycal_core::date_utils::format_iso;
use staycal_core::occupancy::Occupancy;
use staycal_core::view::{CalendarDayCell, MonthView};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Apply `style` to `text` if stdout supports colors.
pub fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

/// Colorize text according to the occupancy status
fn colorize_status(status: Occupancy, text: &str) -> String {
    let style = match status {
        Occupancy::Free => Style::new().green(),
        Occupancy::ArrivalDay => Style::new().yellow(),
        Occupancy::DepartureDay => Style::new().cyan(),
        Occupancy::FullyOccupied => Style::new().red(),
    };
    paint(text, style)
}

impl Render for Occupancy {
    fn render(&self) -> String {
        colorize_status(*self, self.label())
    }
}

impl Render for DateRange {
    fn render(&self) -> String {
        let nights = self.nights();
        let label = format!("({} {})", nights, if nights == 1 { "night" } else { "nights" });
        format!(
            "{} → {}  {} {}",
            format_iso(self.start),
            format_iso(self.end),
            self.summary,
            paint(label, Style::new().dimmed())
        )
    }
}

impl Render for CalendarDayCell<'_> {
    fn render(&self) -> String {
        let text = format!("{:>2}", self.date.day());

        if !self.in_current_period {
            return paint(text, Style::new().dimmed());
        }

        let colored = colorize_status(self.status(), &text);
        if self.is_today {
            paint(colored, Style::new().bold().underline())
        } else {
            colored
        }
    }
}

/// Visible width of a rendered month block.
const MONTH_WIDTH: usize = 20;

/// Gap between month blocks in the year layout.
const MONTH_GAP: &str = "   ";

/// Months per row in the year layout.
const MONTHS_PER_ROW: usize = 3;

/// Render a month as lines of exactly `MONTH_WIDTH` visible columns:
/// title, weekday header, then one line per week.
fn month_lines(month: &MonthView) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);

    let title = format!("{:^width$}", month.title(), width = MONTH_WIDTH);
    lines.push(paint(title, Style::new().bold()));
    lines.push(paint("Su Mo Tu We Th Fr Sa", Style::new().dimmed()));

    for week in month.weeks() {
        let cells: Vec<String> = week.iter().map(|cell| cell.render()).collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// Render a single month grid.
pub fn render_month(month: &MonthView) -> String {
    month_lines(month).join("\n")
}

/// Render months side by side, `MONTHS_PER_ROW` to a row.
pub fn render_months(months: &[MonthView]) -> String {
    if months.len() == 1 {
        return render_month(&months[0]);
    }

    let mut rows = Vec::new();

    for chunk in months.chunks(MONTHS_PER_ROW) {
        let blocks: Vec<Vec<String>> = chunk.iter().map(month_lines).collect();
        let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

        let lines: Vec<String> = (0..height)
            .map(|i| {
                blocks
                    .iter()
                    .map(|block| match block.get(i) {
                        Some(line) => line.clone(),
                        None => " ".repeat(MONTH_WIDTH),
                    })
                    .collect::<Vec<_>>()
                    .join(MONTH_GAP)
                    .trim_end()
                    .to_string()
            })
            .collect();

        rows.push(lines.join("\n"));
    }

    rows.join("\n\n")
}

/// Color key shown under the grid.
pub fn render_legend() -> String {
    [
        Occupancy::Free,
        Occupancy::FullyOccupied,
        Occupancy::ArrivalDay,
        Occupancy::DepartureDay,
    ]
    .iter()
    .map(|status| format!("{} {}", colorize_status(*status, "■"), status.label()))
    .collect::<Vec<_>>()
    .join("   ")
}
