//! Configuration and settings management for StepKit
//!
//! Provides configuration file handling and validation. Supports JSON and TOML
//! file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Layout constants (canvas size, grid pitches, push-away distances)
//! - UI preferences (grid lines, 3-D step view, canvas background)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stepkit_core::LayoutConfig;
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "stepkit";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported config file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a path's extension.
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        if extension.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if extension.eq_ignore_ascii_case("toml") {
            Ok(Self::Toml)
        } else {
            Err(SettingsError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension.to_string(),
            })
        }
    }
}

/// UI preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// Draw the free-canvas grid lines
    #[serde(default = "default_true")]
    pub show_grid_lines: bool,
    /// Render steps as raised 3-D blocks
    #[serde(default)]
    pub three_d_view: bool,
    /// Show the order badge on each step
    #[serde(default = "default_true")]
    pub show_step_numbers: bool,
    /// CSS colour or gradient behind the canvas
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_true() -> bool {
    true
}

fn default_background() -> String {
    "#ffffff".to_string()
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_grid_lines: true,
            three_d_view: false,
            show_step_numbers: true,
            background: default_background(),
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Geometry constants handed to the layout engine
    #[serde(default)]
    pub layout: LayoutConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        let write_error = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        std::fs::write(path, content).map_err(write_error)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.layout.validate()?;

        if self.layout.canvas_width < self.layout.step_cell_size
            || self.layout.canvas_height < self.layout.step_cell_size
        {
            return Err(SettingsError::CanvasTooSmall {
                cell: self.layout.step_cell_size,
                width: self.layout.canvas_width,
                height: self.layout.canvas_height,
            });
        }

        if self.ui.background.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "ui.background".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Platform config directory for StepKit, e.g. `~/.config/stepkit` on Linux.
pub fn config_dir() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(SettingsError::NoConfigDir(std::env::consts::OS))
}

/// Default config file location.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}
