//! Reserved date ranges and identifier generation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_utils::{add_days, format_iso, is_supported_date, is_within_range};
use crate::error::{StaycalError, StaycalResult};

/// Summary used when a feed entry or a new range carries none.
pub const DEFAULT_SUMMARY: &str = "Reserved";

/// A reserved stretch of nights.
///
/// `end` is the last occupied night (inclusive), not the checkout day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub summary: String,
}

impl DateRange {
    /// Build a range, rejecting `start > end` and anything `validate`
    /// rejects.
    ///
    /// Producers outside the feed (manual entry, assistants) go through
    /// here; the feed parser does not validate ordering.
    pub fn new(
        id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        summary: Option<&str>,
    ) -> StaycalResult<Self> {
        if start > end {
            return Err(StaycalError::InvalidRange {
                start: format_iso(start),
                end: format_iso(end),
            });
        }

        let range = DateRange {
            id: id.into(),
            start,
            end,
            summary: summary_or_default(summary.unwrap_or_default()).to_string(),
        };
        range.validate()?;
        Ok(range)
    }

    /// Check that the range can be written to a feed and read back: the
    /// arrival and checkout days must both have four-digit years, and the
    /// id must be free of control characters.
    pub fn validate(&self) -> StaycalResult<()> {
        if self.id.chars().any(char::is_control) {
            return Err(StaycalError::InvalidId(self.id.clone()));
        }
        if self.checkout_day().is_none() {
            return Err(StaycalError::DateOutOfBounds {
                start: format_iso(self.start),
                end: format_iso(self.end),
            });
        }
        Ok(())
    }

    /// The exclusive checkout day, `end + 1`.
    ///
    /// `None` when it or the arrival day falls outside years 1-9999.
    pub fn checkout_day(&self) -> Option<NaiveDate> {
        if !is_supported_date(self.start) {
            return None;
        }
        add_days(self.end, 1).filter(|day| is_supported_date(*day))
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        is_within_range(day, self.start, self.end)
    }

    /// Number of nights, counting both ends.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The placeholder summary when `summary` is blank.
pub fn summary_or_default(summary: &str) -> &str {
    if summary.trim().is_empty() {
        DEFAULT_SUMMARY
    } else {
        summary
    }
}

/// Source of fresh identifiers for ranges that arrive without one.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, ... identifiers.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialIds {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
