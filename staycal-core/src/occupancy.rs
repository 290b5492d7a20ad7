//! Per-day occupancy derived from the ranges covering a day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;

/// Display status of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Free,
    /// First night of a stay; the morning is still free.
    ArrivalDay,
    /// Last night of a stay.
    DepartureDay,
    /// Booked all day, including double-booked days.
    FullyOccupied,
}

impl Occupancy {
    /// Single-character marker used by plain-text renderers.
    pub fn symbol(&self) -> &'static str {
        match self {
            Occupancy::Free => ".",
            Occupancy::ArrivalDay => "[",
            Occupancy::DepartureDay => "]",
            Occupancy::FullyOccupied => "#",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Occupancy::Free => "Free",
            Occupancy::ArrivalDay => "Arrival",
            Occupancy::DepartureDay => "Departure",
            Occupancy::FullyOccupied => "Reserved",
        }
    }

    pub fn is_free(&self) -> bool {
        *self == Occupancy::Free
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ranges whose inclusive `[start, end]` contains `day`, in input order.
pub fn covering_ranges(day: NaiveDate, ranges: &[DateRange]) -> Vec<&DateRange> {
    ranges.iter().filter(|r| r.covers(day)).collect()
}

/// Classify `day` given the ranges covering it.
///
/// Overlapping ranges are reported as fully occupied; a lone range marks
/// its first night as arrival and its last night as departure, unless both
/// fall on the same day.
pub fn resolve_status(day: NaiveDate, covering: &[&DateRange]) -> Occupancy {
    match covering {
        [] => Occupancy::Free,
        [range] => {
            let is_start = range.start == day;
            let is_end = range.end == day;
            match (is_start, is_end) {
                (true, false) => Occupancy::ArrivalDay,
                (false, true) => Occupancy::DepartureDay,
                _ => Occupancy::FullyOccupied,
            }
        }
        _ => Occupancy::FullyOccupied,
    }
}

/// Shorthand for `resolve_status(day, &covering_ranges(day, ranges))`.
pub fn status_on(day: NaiveDate, ranges: &[DateRange]) -> Occupancy {
    resolve_status(day, &covering_ranges(day, ranges))
}
