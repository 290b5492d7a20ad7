use std::path::Path;

use anyhow::Result;
use owo_colors::Style;
use staycal_core::config::StaycalConfig;
use staycal_core::date_utils::{format_iso, parse_iso};
use staycal_core::occupancy::{covering_ranges, resolve_status};

use super::load_ranges;
use crate::render::{Render, paint};

pub fn run(config: &StaycalConfig, date: &str, ics: Option<&Path>) -> Result<()> {
    let day = parse_iso(date)?;
    let ranges = load_ranges(config, ics)?;

    let covering = covering_ranges(day, &ranges);
    let status = resolve_status(day, &covering);

    println!("{} {}", paint(format_iso(day), Style::new().bold()), status.render());
    for range in covering {
        println!("   {}", range.render());
    }

    Ok(())
}
