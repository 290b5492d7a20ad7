//! Explicit view state and day-cell grids for month and year views.
//!
//! Nothing here is global: the caller owns a `ViewState`, moves it with
//! `next`/`prev`, and asks it for the months to render. Cells borrow the
//! caller's ranges and are meant to be discarded after each render.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::date_utils::build_month_grid;
use crate::error::{StaycalError, StaycalResult};
use crate::occupancy::{Occupancy, covering_ranges, resolve_status};

/// Granularity of the displayed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Month,
    #[default]
    Year,
}

impl FromStr for ViewMode {
    type Err = StaycalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "year" => Ok(ViewMode::Year),
            other => Err(StaycalError::Config(format!(
                "Unknown view '{}'. Expected 'month' or 'year'",
                other
            ))),
        }
    }
}

/// One rendered day.
#[derive(Debug, Clone)]
pub struct CalendarDayCell<'a> {
    pub date: NaiveDate,
    pub in_current_period: bool,
    pub is_today: bool,
    pub covering: Vec<&'a DateRange>,
}

impl CalendarDayCell<'_> {
    pub fn status(&self) -> Occupancy {
        resolve_status(self.date, &self.covering)
    }
}

/// Cells of one month grid.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month_index: u32,
    pub cells: Vec<CalendarDayCell<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn build(
        year: i32,
        month_index: u32,
        ranges: &'a [DateRange],
        today: NaiveDate,
    ) -> StaycalResult<Self> {
        Ok(MonthView {
            year,
            month_index,
            cells: month_cells(year, month_index, ranges, today)?,
        })
    }

    /// Cells grouped into Sunday-first weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDayCell<'a>]> {
        self.cells.chunks(7)
    }

    /// Heading such as "July 2025".
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month_index + 1, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

/// Build the day cells for a month grid, attaching the ranges covering
/// each day.
pub fn month_cells<'a>(
    year: i32,
    month_index: u32,
    ranges: &'a [DateRange],
    today: NaiveDate,
) -> StaycalResult<Vec<CalendarDayCell<'a>>> {
    let grid = build_month_grid(year, month_index)?;

    Ok(grid
        .into_iter()
        .map(|slot| CalendarDayCell {
            date: slot.date,
            in_current_period: slot.in_current_period,
            is_today: slot.date == today,
            covering: covering_ranges(slot.date, ranges),
        })
        .collect())
}

/// The displayed period and its granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub year: i32,
    pub month_index: u32,
    pub mode: ViewMode,
}

impl ViewState {
    pub fn new(year: i32, month_index: u32, mode: ViewMode) -> StaycalResult<Self> {
        // Validates both fields.
        build_month_grid(year, month_index)?;
        Ok(ViewState {
            year,
            month_index,
            mode,
        })
    }

    /// One month forward in month mode, one year forward in year mode.
    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    fn shift(self, step: i32) -> Self {
        match self.mode {
            ViewMode::Year => ViewState {
                year: self.year + step,
                ..self
            },
            ViewMode::Month => {
                let absolute = self.year * 12 + self.month_index as i32 + step;
                ViewState {
                    year: absolute.div_euclid(12),
                    month_index: absolute.rem_euclid(12) as u32,
                    ..self
                }
            }
        }
    }

    /// Month grids for the current period: one in month mode, twelve in
    /// year mode.
    pub fn render_months<'a>(
        &self,
        ranges: &'a [DateRange],
        today: NaiveDate,
    ) -> StaycalResult<Vec<MonthView<'a>>> {
        match self.mode {
            ViewMode::Month => Ok(vec![MonthView::build(
                self.year,
                self.month_index,
                ranges,
                today,
            )?]),
            ViewMode::Year => (0..12)
                .map(|month_index| MonthView::build(self.year, month_index, ranges, today))
                .collect(),
        }
    }
}
