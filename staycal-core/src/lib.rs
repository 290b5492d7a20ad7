//! Core types for staycal.
//!
//! This crate turns an availability feed (iCalendar text) into reserved
//! date ranges, derives a per-day occupancy status for calendar grids, and
//! writes ranges back out as iCalendar:
//! - `ics` for the lenient parser and the generator
//! - `occupancy` for per-day status resolution
//! - `view` for month/year grids and the explicit view state

pub mod config;
pub mod date_range;
pub mod date_utils;
pub mod error;
pub mod ics;
pub mod occupancy;
pub mod snapshot;
pub mod view;

pub use date_range::{DEFAULT_SUMMARY, DateRange, IdGenerator, SequentialIds, UuidIds};
pub use error::{StaycalError, StaycalResult};
pub use occupancy::Occupancy;
