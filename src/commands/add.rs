use anyhow::Result;
use owo_colors::Style;
use staycal_core::config::StaycalConfig;
use staycal_core::date_utils::parse_iso;
use staycal_core::snapshot::Snapshot;
use staycal_core::{DateRange, IdGenerator, UuidIds};

use crate::render::{Render, paint};

pub fn run(config: &StaycalConfig, start: &str, end: &str, summary: Option<&str>) -> Result<()> {
    let start = parse_iso(start)?;
    let end = parse_iso(end)?;
    let range = DateRange::new(UuidIds.next_id(), start, end, summary)?;

    let snapshot_path = config.snapshot_path();
    let mut events = Snapshot::load(&snapshot_path)?
        .map(|s| s.events)
        .unwrap_or_default();

    let overlapping = events
        .iter()
        .filter(|e| e.start <= range.end && range.start <= e.end)
        .count();

    println!("{} {}", paint("+", Style::new().green()), range.render());
    if overlapping > 0 {
        println!(
            "   {}",
            paint(
                format!("overlaps {} existing reservation(s)", overlapping),
                Style::new().yellow()
            )
        );
    }

    events.push(range);
    Snapshot::new(events).save(&snapshot_path)?;

    Ok(())
}
