//! # StepKit Core
//!
//! Core types shared by the StepKit crates: pixel and grid-cell geometry,
//! object identifiers, the layout constants block and the error taxonomy.

pub mod error;
pub mod geometry;
pub mod ids;
pub mod layout;

pub use error::{LayoutError, Result};
pub use geometry::{Bounds, Footprint, GridResolution, LocalCell, Point, Size};
pub use ids::ObjectId;
pub use layout::LayoutConfig;
