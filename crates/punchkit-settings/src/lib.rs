//! # Punchkit Settings
//!
//! Application configuration: sectioned defaults for panel dimensions,
//! image sampling, toolpath rates, grid division and canvas preferences,
//! persisted as TOML (with JSON import/export) in the platform config
//! directory.

pub mod config;
pub mod error;
pub mod manager;

pub use config::{CanvasPrefs, PanelDefaults, SamplingDefaults, Settings};
pub use error::{SettingsError, SettingsResult};
pub use manager::SettingsManager;
