//! Calendar arithmetic on timezone-naive dates.
//!
//! Month indices are zero-based (0 = January) throughout, matching how the
//! grid is addressed by the view layer.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{StaycalError, StaycalResult};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// One slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    /// False for the fill days borrowed from the neighbouring months.
    pub in_current_period: bool,
}

/// First day of the given month, validating both inputs.
fn first_of_month(year: i32, month_index: u32) -> StaycalResult<NaiveDate> {
    if month_index > 11 {
        return Err(StaycalError::InvalidMonth(month_index));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(StaycalError::InvalidYear(year));
    }
    NaiveDate::from_ymd_opt(year, month_index + 1, 1).ok_or(StaycalError::InvalidYear(year))
}

/// Number of days in the given month (28-31).
pub fn days_in_month(year: i32, month_index: u32) -> StaycalResult<u32> {
    let first = first_of_month(year, month_index)?;
    let next_first = if month_index == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month_index + 2, 1)
    }
    .ok_or(StaycalError::InvalidYear(year))?;

    Ok((next_first - first).num_days() as u32)
}

/// Every day of the given month, in ascending order.
pub fn days_of_month(year: i32, month_index: u32) -> StaycalResult<Vec<NaiveDate>> {
    let first = first_of_month(year, month_index)?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month0() == month_index)
        .collect())
}

/// Format as zero-padded `YYYY-MM-DD`.
///
/// Fixed width for years 1-9999, so string order equals date order.
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso(s: &str) -> StaycalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| StaycalError::InvalidDate(s.to_string()))
}

/// True iff `start <= day <= end`. Inclusive on both ends.
pub fn is_within_range(day: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= day && day <= end
}

/// Shift a date by a signed number of days. `None` past chrono's bounds.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// True for years 1-9999, where dates keep their fixed-width `YYYY-MM-DD`
/// and `YYYYMMDD` forms.
pub fn is_supported_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Build a Sunday-first grid for the month.
///
/// Leading cells come from the previous month, trailing cells from the next
/// one, and the total is the smallest multiple of 7 that fits the month.
pub fn build_month_grid(year: i32, month_index: u32) -> StaycalResult<Vec<GridDay>> {
    let first = first_of_month(year, month_index)?;
    let leading = first.weekday().num_days_from_sunday();
    let month_len = days_in_month(year, month_index)?;
    let total = (leading + month_len).div_ceil(7) * 7;

    let grid_start =
        add_days(first, -i64::from(leading)).ok_or(StaycalError::InvalidYear(year))?;

    Ok(grid_start
        .iter_days()
        .take(total as usize)
        .zip(0u32..)
        .map(|(date, offset)| GridDay {
            date,
            in_current_period: offset >= leading && offset < leading + month_len,
        })
        .collect())
}
