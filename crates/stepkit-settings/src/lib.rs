//! StepKit Settings Crate
//!
//! Handles editor configuration: layout constants and UI preferences, loaded
//! from and saved to JSON or TOML files in the platform config directory.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, ConfigFormat, UiSettings};
pub use error::{SettingsError, SettingsResult};
