//! Placement configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! configuration. Load with [`PlacementConfig::from_json_str`] or
//! [`PlacementConfig::load`]; both validate before returning.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::conflict::ConflictScope;
use crate::rows::LaneLayout;
use crate::timeline::TimelineScale;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The content is not valid JSON for this schema.
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the placement engine and the board layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Length of a schedule created without an end date (days).
    #[serde(default = "default_duration_days")]
    pub default_duration_days: u32,
    /// Lanes per bay.
    #[serde(default = "default_max_rows")]
    pub max_rows: u32,
    /// Height of one lane on screen (px).
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f64,
    /// Whether conflicts are checked per bay or per row.
    #[serde(default)]
    pub conflict_scope: ConflictScope,
    /// Ask the project directory to mark a project active when today
    /// falls inside its new schedule.
    #[serde(default = "default_true")]
    pub promote_active: bool,
    /// Slot widths for the timeline.
    #[serde(default)]
    pub timeline: TimelineScale,
}

/// Longest default duration accepted from configuration (ten years).
pub const MAX_DEFAULT_DURATION_DAYS: u32 = 3650;

fn default_duration_days() -> u32 {
    7
}

fn default_max_rows() -> u32 {
    4
}

fn default_row_height_px() -> f64 {
    60.0
}

fn default_true() -> bool {
    true
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            default_duration_days: default_duration_days(),
            max_rows: default_max_rows(),
            row_height_px: default_row_height_px(),
            conflict_scope: ConflictScope::default(),
            promote_active: default_true(),
            timeline: TimelineScale::default(),
        }
    }
}

impl PlacementConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEFAULT_DURATION_DAYS).contains(&self.default_duration_days) {
            return Err(ConfigError::Invalid(format!(
                "defaultDurationDays must be within 1..={MAX_DEFAULT_DURATION_DAYS}, got {}",
                self.default_duration_days
            )));
        }
        if self.max_rows == 0 {
            return Err(ConfigError::Invalid("maxRows must be at least 1".into()));
        }
        if !(self.row_height_px.is_finite() && self.row_height_px > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rowHeightPx must be positive, got {}",
                self.row_height_px
            )));
        }
        self.timeline.validate().map_err(ConfigError::Invalid)
    }

    /// Lane geometry derived from this configuration.
    pub fn lane_layout(&self) -> LaneLayout {
        LaneLayout::new(self.row_height_px, self.max_rows)
    }
}
