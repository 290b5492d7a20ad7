pub mod add;
pub mod export;
pub mod import;
pub mod list;
pub mod show;
pub mod status;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use staycal_core::config::StaycalConfig;
use staycal_core::ics::parse_ics;
use staycal_core::snapshot::Snapshot;
use staycal_core::{DateRange, UuidIds};

/// Read .ics text from a path, or stdin for "-".
pub fn read_ics_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Could not read .ics from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(source).with_context(|| format!("Could not read {}", source))
}

/// Ranges from an explicit .ics file when given, otherwise the snapshot.
pub fn load_ranges(config: &StaycalConfig, ics: Option<&Path>) -> Result<Vec<DateRange>> {
    if let Some(path) = ics {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        return Ok(parse_ics(&content, &mut UuidIds));
    }

    let snapshot_path = config.snapshot_path();
    match Snapshot::load(&snapshot_path)? {
        Some(snapshot) => Ok(snapshot.events),
        None => anyhow::bail!(
            "No reservations imported yet.\n\n\
            Import a feed with:\n  \
            staycal import <file.ics>\n\n\
            Or read one directly:\n  \
            staycal show --ics <file.ics>"
        ),
    }
}
