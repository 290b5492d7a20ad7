//! User configuration for staycal.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{StaycalError, StaycalResult};
use crate::view::ViewMode;

static DEFAULT_DATA_DIR: &str = "~/.local/share/staycal";
static DEFAULT_EXPORT_FILENAME: &str = "calendar_backup.ics";
static SNAPSHOT_FILENAME: &str = "events.json";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

/// Configuration at ~/.config/staycal/config.toml, overridable with
/// `STAYCAL_*` environment variables (e.g. `STAYCAL_DEFAULT_VIEW=month`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StaycalConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_export_filename")]
    pub export_filename: String,

    #[serde(default)]
    pub default_view: ViewMode,
}

impl Default for StaycalConfig {
    fn default() -> Self {
        StaycalConfig {
            data_dir: default_data_dir(),
            export_filename: default_export_filename(),
            default_view: ViewMode::default(),
        }
    }
}

impl StaycalConfig {
    pub fn config_path() -> StaycalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StaycalError::Config("Could not determine config directory".into()))?
            .join("staycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template on
    /// first run.
    pub fn load() -> StaycalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file (which may be missing) plus environment.
    pub fn load_from(path: &Path) -> StaycalResult<Self> {
        let config: StaycalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STAYCAL"))
            .build()
            .map_err(|e| StaycalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StaycalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Where the local record snapshot lives.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_path().join(SNAPSHOT_FILENAME)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StaycalResult<()> {
        let contents = format!(
            "\
# staycal configuration

# Where imported reservations are stored:
# data_dir = \"{}\"

# File name used by `staycal export` when no --output is given:
# export_filename = \"{}\"

# View shown by `staycal show` (\"month\" or \"year\"):
# default_view = \"year\"
",
            DEFAULT_DATA_DIR, DEFAULT_EXPORT_FILENAME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StaycalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StaycalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
