//! ICS generation and parsing for availability feeds.
//!
//! The feed's DTEND is the exclusive checkout day; `DateRange::end` is the
//! inclusive last night. Parsing subtracts a day and generation adds it back.

mod generate;
mod parse;

pub use generate::{PRODID, generate_ics, generate_ics_at};
pub use parse::parse_ics;
