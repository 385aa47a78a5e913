//! # StepKit
//!
//! A layout engine for step-based checklist posters. Hosts place icons, text
//! and "steps" (container boxes with their own internal grid) on a fixed
//! canvas, and the engine keeps the layout consistent while they drag:
//! - Free objects snap to a 10px canvas grid
//! - Icons dropped over a step snap into the step's 20px cell grid
//! - Steps push overlapping neighbours out of the way
//! - An expanded 3x view edits one step's grid with collision-blocked drops
//!
//! ## Architecture
//!
//! StepKit is organized as a workspace with multiple crates:
//!
//! 1. **stepkit-core** - Geometry types, ids, layout constants, errors
//! 2. **stepkit-designer** - Grid math, collision, object store, drag state machine
//! 3. **stepkit-settings** - Config files (JSON/TOML) and UI preferences
//! 4. **stepkit** - This crate: re-exports, logging setup and a headless binary

pub use stepkit_designer as designer;
pub use stepkit_settings as settings;

pub use stepkit_core::{
    Bounds, Footprint, GridResolution, LayoutConfig, LayoutError, LocalCell, ObjectId, Point,
    Result, Size,
};

pub use stepkit_designer::{
    Attachment, CanvasObject, DragFrame, DragOutcome, DragPreview, DragState, EditorSession,
    ObjectKind, ObjectStore, ObjectTemplate, PropertyUpdate, QuickKit,
};

pub use stepkit_settings::{Config, SettingsError, UiSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Creates an editing session from a loaded configuration.
pub fn open_session(config: &Config) -> anyhow::Result<EditorSession> {
    Ok(EditorSession::with_config(config.layout.clone())?)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting on stderr
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the layout output, so logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
