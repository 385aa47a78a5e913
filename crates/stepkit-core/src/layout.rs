//! Layout constants.
//!
//! Every number the geometry engine depends on lives here so hosts can tune
//! the canvas without touching the algorithms. The defaults reproduce the
//! poster editor: a 600x800 canvas, a 10px free grid, 20px step cells and a
//! 3x expanded step view.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::{Bounds, Point, Size};

/// Geometry constants for a canvas editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub canvas_width: f64,
    /// Canvas height in pixels
    pub canvas_height: f64,
    /// Snap pitch for objects that are free on the canvas
    pub free_grid_size: f64,
    /// Edge length of one cell in a step's internal grid
    pub step_cell_size: f64,
    /// Zoom applied to a step in the expanded editing view (both axes)
    pub expansion_factor: f64,
    /// Steps closer than this are treated as overlapping
    pub push_margin: f64,
    /// Minimum distance a pushed step travels
    pub push_distance: f64,
    /// Clearance kept between a pushed step and the moving step's edge
    pub min_push_distance: f64,
    /// Offset applied to duplicated objects on both axes
    pub duplicate_offset: f64,
    /// Pixel size of one preset cell when a step is created from a preset
    pub preset_cell_size: f64,
    /// Visual depth given to new steps
    pub default_depth_hint: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 800.0,
            free_grid_size: 10.0,
            step_cell_size: 20.0,
            expansion_factor: 3.0,
            push_margin: 15.0,
            push_distance: 40.0,
            min_push_distance: 20.0,
            duplicate_offset: 20.0,
            preset_cell_size: 40.0,
            default_depth_hint: 40.0,
        }
    }
}

impl LayoutConfig {
    /// Canvas bounds anchored at the origin.
    pub fn canvas_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }

    /// Clamps a box origin so a box of `size` stays inside the canvas.
    ///
    /// A box larger than the canvas is pinned at the origin on that axis.
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        let max_x = (self.canvas_width - size.width).max(0.0);
        let max_y = (self.canvas_height - size.height).max(0.0);
        Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y))
    }

    /// Checks every constant is usable by the grid math.
    pub fn validate(&self) -> Result<()> {
        fn positive(key: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig {
                    key,
                    reason: format!("must be positive and finite, got {value}"),
                })
            }
        }
        fn non_negative(key: &'static str, value: f64) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(LayoutError::InvalidConfig {
                    key,
                    reason: format!("must be non-negative and finite, got {value}"),
                })
            }
        }

        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("free_grid_size", self.free_grid_size)?;
        positive("step_cell_size", self.step_cell_size)?;
        positive("expansion_factor", self.expansion_factor)?;
        positive("preset_cell_size", self.preset_cell_size)?;
        non_negative("push_margin", self.push_margin)?;
        non_negative("push_distance", self.push_distance)?;
        non_negative("min_push_distance", self.min_push_distance)?;
        non_negative("duplicate_offset", self.duplicate_offset)?;
        non_negative("default_depth_hint", self.default_depth_hint)?;
        Ok(())
    }
}
