//! Errors raised while reading, writing or checking a StepKit config file.

use std::io;
use std::path::PathBuf;

use stepkit_core::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the file or creating its parent directory failed.
    #[error("Cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// A value is outside what the layout engine accepts.
    ///
    /// `key` is the dotted path inside the file, e.g. `layout.push_margin`.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A single step grid cell would not fit on the canvas.
    #[error("A {cell}px step cell does not fit a {width}x{height} canvas")]
    CanvasTooSmall { cell: f64, width: f64, height: f64 },

    /// `dirs` found no config directory for this platform.
    #[error("No config directory available on {0}")]
    NoConfigDir(&'static str),
}

impl From<LayoutError> for SettingsError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::InvalidConfig { key, reason } => SettingsError::InvalidSetting {
                key: format!("layout.{key}"),
                reason,
            },
            other => SettingsError::InvalidSetting {
                key: "layout".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
