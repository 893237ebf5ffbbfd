// Application configuration types
//
// This module contains:
// - Loop and animation timing constants
// - The widget configuration (palettes and tracking geometry)
// - Config file loading and validation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::theme::PaletteStore;
use crate::widget::VIEW_BOX;

// ============================================================================
// Constants
// ============================================================================

/// Frame interval for the render/input loop (~60 fps)
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Duration of the closing half of a blink
pub const BLINK_CLOSE_MS: u64 = 90;

/// Duration of the opening half of a blink
pub const BLINK_OPEN_MS: u64 = 120;

/// Shortest pause between two blinks
pub const BLINK_DELAY_MIN_MS: u64 = 2200;

/// Random span added on top of the shortest pause
pub const BLINK_DELAY_SPAN_MS: u64 = 2000;

/// Eye height at the bottom of a blink
pub const CLOSED_EYE_HEIGHT: f64 = 1.0;

/// Fraction of the remaining distance covered by one idle centering step
pub const IDLE_SMOOTHING: f64 = 0.15;

/// How often the system theme preference is re-read
pub const SYSTEM_THEME_POLL_MS: u64 = 2000;

/// Typical terminal cell size, used to turn cell coordinates into pixels
pub const DEFAULT_CELL_WIDTH_PX: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT_PX: f64 = 16.0;

/// Number of widgets the terminal layout can hold side by side
pub const MAX_INSTANCES: usize = 4;

// ============================================================================
// Errors
// ============================================================================

/// Failure to load a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid color {0:?}, expected #RRGGBB")]
    InvalidColor(String),

    #[error("{field} must be a positive number")]
    NonPositive { field: &'static str },

    #[error("{field} must be at most {max}")]
    TooLarge { field: &'static str, max: f64 },
}

// ============================================================================
// Enums
// ============================================================================

/// What drives the idle-mode eye centering step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdleCentering {
    /// One step per pointer-move event (default)
    #[default]
    Pointer,
    /// One step per frame, whether or not the pointer moves
    Frame,
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Widget configuration, fixed once an instance is built
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemyConfig {
    /// Light and dark palettes
    pub palette: PaletteStore,

    /// Period of the color cycler in milliseconds
    pub cycle_interval_ms: u64,

    /// Pointer distance (px) inside which the eyes stay centered
    pub dead_zone: f64,

    /// Distance (px) past the dead zone over which the offset ramps up
    pub falloff: f64,

    /// Largest eye offset in view-box units
    pub max_offset: f64,

    /// Full (open) eye height in view-box units
    pub eye_height: f64,

    /// Trigger for idle centering
    pub idle_centering: IdleCentering,

    /// Pixel size of one terminal cell
    pub cell_width_px: f64,
    pub cell_height_px: f64,
}

impl Default for RemyConfig {
    fn default() -> Self {
        Self {
            palette: PaletteStore::default(),
            cycle_interval_ms: 900,
            dead_zone: 40.0,
            falloff: 160.0,
            max_offset: 1.5,
            eye_height: 5.0,
            idle_centering: IdleCentering::default(),
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl RemyConfig {
    /// Load and validate a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every numeric setting must be positive; eyes must fit the icon
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_interval_ms == 0 {
            return Err(ConfigError::NonPositive {
                field: "cycle_interval_ms",
            });
        }

        let fields = [
            ("dead_zone", self.dead_zone),
            ("falloff", self.falloff),
            ("max_offset", self.max_offset),
            ("eye_height", self.eye_height),
            ("cell_width_px", self.cell_width_px),
            ("cell_height_px", self.cell_height_px),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if self.eye_height > VIEW_BOX {
            return Err(ConfigError::TooLarge {
                field: "eye_height",
                max: VIEW_BOX,
            });
        }

        Ok(())
    }

    /// Color cycler period
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_millis(self.cycle_interval_ms)
    }
}
