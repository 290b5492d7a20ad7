use std::path::Path;

use anyhow::Result;
use owo_colors::Style;
use staycal_core::config::StaycalConfig;

use super::load_ranges;
use crate::render::{Render, paint};

pub fn run(config: &StaycalConfig, ics: Option<&Path>, json: bool) -> Result<()> {
    let mut ranges = load_ranges(config, ics)?;
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

    if json {
        println!("{}", serde_json::to_string_pretty(&ranges)?);
        return Ok(());
    }

    if ranges.is_empty() {
        println!("{}", paint("No reservations", Style::new().dimmed()));
        return Ok(());
    }

    for range in &ranges {
        println!("{}", range.render());
    }

    Ok(())
}
