//! Configuration and settings management for Floorkit
//!
//! Provides configuration file handling and validation. Supports JSON
//! and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (cell size, canvas center)
//! - Zoom settings (range, step, wheel sensitivity)
//! - History settings (cap, debounce)
//! - Booking settings (turn time)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use floorkit_canvas::{CanvasConfig, GestureConfig, ZoomLimits};
use floorkit_core::constants;
use floorkit_core::{GridMetrics, PixelPoint};

use crate::error::{Result, SettingsError};

/// Grid and canvas geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Size of one grid cell in pixels.
    pub cell_px: f64,
    /// Virtual canvas center, X.
    pub canvas_center_x: f64,
    /// Virtual canvas center, Y.
    pub canvas_center_y: f64,
    /// Smallest allowed table edge in grid units.
    pub min_table_size: f64,
    /// Largest allowed table edge in grid units.
    pub max_table_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cell_px: constants::GRID_CELL_PX,
            canvas_center_x: constants::CANVAS_CENTER_X,
            canvas_center_y: constants::CANVAS_CENTER_Y,
            min_table_size: constants::MIN_TABLE_SIZE_GRID,
            max_table_size: constants::MAX_TABLE_SIZE_GRID,
        }
    }
}

/// Zoom range and input sensitivity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomSettings {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Increment for keyboard zoom shortcuts.
    pub step: f64,
    /// Multiplier converting wheel delta into a zoom delta.
    pub wheel_sensitivity: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            min: constants::MIN_ZOOM,
            max: constants::MAX_ZOOM,
            default: constants::DEFAULT_ZOOM,
            step: constants::ZOOM_STEP,
            wheel_sensitivity: constants::WHEEL_ZOOM_SENSITIVITY,
        }
    }
}

/// Undo/redo history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum retained entries.
    pub max_entries: usize,
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: constants::MAX_HISTORY_ENTRIES,
            debounce_ms: constants::HISTORY_DEBOUNCE_MS,
        }
    }
}

/// Booking and reservation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// Default table turn time in minutes.
    pub default_turn_minutes: i64,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            default_turn_minutes: constants::DEFAULT_TURN_MINUTES,
        }
    }
}

/// Aggregated application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridSettings,
    pub zoom: ZoomSettings,
    pub history: HistorySettings,
    pub booking: BookingSettings,
}

impl Config {
    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        Ok(dir.join("floorkit").join("config.toml"))
    }

    /// Loads configuration from a file, JSON or TOML by extension.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {e}", path.display())))?;
        let config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => toml::from_str(&contents)?,
        };
        config.validate()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(config)
    }

    /// Saves configuration to a file, JSON or TOML by extension.
    /// Parent directories are created as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self)?,
        };
        fs::write(path, contents)
            .map_err(|e| SettingsError::SaveError(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        if self.grid.cell_px <= 0.0 || !self.grid.cell_px.is_finite() {
            return Err(SettingsError::InvalidSetting {
                key: "grid.cell_px".to_string(),
                reason: format!("must be positive and finite, got {}", self.grid.cell_px),
            });
        }
        if self.grid.min_table_size > self.grid.max_table_size {
            return Err(SettingsError::InvalidSetting {
                key: "grid.min_table_size".to_string(),
                reason: "exceeds max_table_size".to_string(),
            });
        }
        if self.zoom.min <= 0.0 || self.zoom.min >= self.zoom.max {
            return Err(SettingsError::InvalidSetting {
                key: "zoom.min".to_string(),
                reason: format!("range [{}, {}] is empty", self.zoom.min, self.zoom.max),
            });
        }
        if self.zoom.default < self.zoom.min || self.zoom.default > self.zoom.max {
            return Err(SettingsError::InvalidSetting {
                key: "zoom.default".to_string(),
                reason: "outside the configured range".to_string(),
            });
        }
        if self.zoom.step <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "zoom.step".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if self.history.max_entries == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "history.max_entries".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.booking.default_turn_minutes <= 0 {
            return Err(SettingsError::InvalidSetting {
                key: "booking.default_turn_minutes".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the engine configuration the canvas session consumes.
    pub fn canvas_config(&self) -> CanvasConfig {
        CanvasConfig {
            metrics: GridMetrics::new(
                self.grid.cell_px,
                PixelPoint::new(self.grid.canvas_center_x, self.grid.canvas_center_y),
            ),
            zoom: ZoomLimits {
                min: self.zoom.min,
                max: self.zoom.max,
                default: self.zoom.default,
                step: self.zoom.step,
            },
            gesture: GestureConfig {
                wheel_sensitivity: self.zoom.wheel_sensitivity,
            },
            max_history: self.history.max_entries,
            history_debounce: Duration::from_millis(self.history.debounce_ms),
        }
    }
}
