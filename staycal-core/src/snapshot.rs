//! Local snapshot of the current record set.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::error::{StaycalError, StaycalResult};

/// The ranges last imported or edited, with the time they were saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub events: Vec<DateRange>,
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(events: Vec<DateRange>) -> Self {
        Snapshot {
            events,
            timestamp: Utc::now(),
        }
    }

    /// Read a snapshot. A missing file is `Ok(None)`.
    ///
    /// Every record must pass `DateRange::validate`, so a hand-edited file
    /// cannot smuggle in ranges the exporter would mangle.
    pub fn load(path: &Path) -> StaycalResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            StaycalError::Snapshot(format!("Could not read {}: {e}", path.display()))
        })?;

        for event in &snapshot.events {
            event.validate().map_err(|e| {
                StaycalError::Snapshot(format!("Invalid record in {}: {e}", path.display()))
            })?;
        }

        Ok(Some(snapshot))
    }

    /// Write as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> StaycalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| StaycalError::Snapshot(e.to_string()))?;
        std::fs::write(path, content)?;

        tracing::info!(count = self.events.len(), path = %path.display(), "Saved snapshot");
        Ok(())
    }
}
