use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Local};
use staycal_core::config::StaycalConfig;
use staycal_core::view::{ViewMode, ViewState};

use super::load_ranges;
use crate::render::{render_legend, render_months};

pub fn run(
    config: &StaycalConfig,
    ics: Option<&Path>,
    year: Option<i32>,
    month: Option<u32>,
    view: Option<ViewMode>,
) -> Result<()> {
    let ranges = load_ranges(config, ics)?;
    let today = Local::now().date_naive();

    // Clap restricts --month to 1-12.
    let state = ViewState::new(
        year.unwrap_or(today.year()),
        month.map(|m| m - 1).unwrap_or(today.month0()),
        view.unwrap_or(config.default_view),
    )?;

    let months = state.render_months(&ranges, today)?;

    println!("{}", render_months(&months));
    println!();
    println!("{}", render_legend());

    Ok(())
}
