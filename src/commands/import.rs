use anyhow::Result;
use owo_colors::Style;
use staycal_core::UuidIds;
use staycal_core::config::StaycalConfig;
use staycal_core::ics::parse_ics;
use staycal_core::snapshot::Snapshot;

use super::read_ics_source;
use crate::render::paint;

pub fn run(config: &StaycalConfig, source: &str) -> Result<()> {
    let content = read_ics_source(source)?;
    let ranges = parse_ics(&content, &mut UuidIds);

    if ranges.is_empty() {
        println!("{}", paint("No reservations found in feed", Style::new().dimmed()));
    }

    let count = ranges.len();
    let snapshot_path = config.snapshot_path();
    Snapshot::new(ranges).save(&snapshot_path)?;

    println!(
        "{} Imported {} {} into {}",
        paint("✓", Style::new().green()),
        count,
        if count == 1 { "reservation" } else { "reservations" },
        paint(snapshot_path.display(), Style::new().dimmed())
    );

    Ok(())
}
