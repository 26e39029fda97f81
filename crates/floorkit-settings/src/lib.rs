//! # Floorkit Settings
//!
//! Configuration management for Floorkit: typed settings sections with
//! defaults, cross-field validation, and JSON/TOML persistence in the
//! platform config directory.
//!
//! The canvas engine itself never reads files; the host loads a
//! [`Config`] here and passes [`Config::canvas_config`] down.

pub mod config;
pub mod error;

pub use config::{BookingSettings, Config, GridSettings, HistorySettings, ZoomSettings};
pub use error::{Result, SettingsError};
