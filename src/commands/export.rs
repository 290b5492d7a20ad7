use anyhow::{Context, Result};
use owo_colors::Style;
use staycal_core::config::StaycalConfig;
use staycal_core::ics::generate_ics;
use staycal_core::snapshot::Snapshot;

use crate::render::paint;

pub fn run(config: &StaycalConfig, output: Option<&str>) -> Result<()> {
    let snapshot_path = config.snapshot_path();
    let events = Snapshot::load(&snapshot_path)?
        .map(|s| s.events)
        .unwrap_or_default();

    let ics = generate_ics(&events);

    let target = output.unwrap_or(&config.export_filename);
    if target == "-" {
        print!("{}", ics);
        return Ok(());
    }

    std::fs::write(target, &ics).with_context(|| format!("Could not write {}", target))?;
    println!(
        "{} Exported {} {} to {}",
        paint("✓", Style::new().green()),
        events.len(),
        if events.len() == 1 { "reservation" } else { "reservations" },
        target
    );

    Ok(())
}
