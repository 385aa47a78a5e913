//! Grid math: conversions between pixels and grid cells.
//!
//! The outer canvas snaps free objects to a fixed pixel pitch. Each step
//! carries its own internal grid whose resolution is derived from the step's
//! pixel size. The expanded editing view shows that same grid zoomed by a
//! fixed factor with step-relative coordinates, so it has no canvas origin.
//!
//! Everything here is pure; invalid inputs resolve to clamping or `None`.

use stepkit_core::{Footprint, GridResolution, LayoutConfig, LocalCell, Point, Size};

use crate::model::CanvasObject;

/// Rounds each axis to the nearest multiple of `cell_size`.
///
/// Ties round away from zero. Snapping an already snapped point returns it
/// unchanged.
pub fn canvas_to_free_grid(point: Point, cell_size: f64) -> Point {
    Point::new(
        (point.x / cell_size).round() * cell_size,
        (point.y / cell_size).round() * cell_size,
    )
}

/// Internal grid resolution of a step of `size` pixels.
///
/// A step narrower than one cell on an axis has zero capacity on that axis.
pub fn step_grid_resolution(size: Size, cell_size: f64) -> GridResolution {
    let cols = (size.width / cell_size).floor().max(0.0);
    let rows = (size.height / cell_size).floor().max(0.0);
    GridResolution::new(cols as u32, rows as u32)
}

/// Clamps a signed cell address into the valid anchor range for `footprint`.
///
/// Returns `None` when the footprint cannot fit the grid at all.
pub fn clamp_local_cell(
    col: i64,
    row: i64,
    resolution: GridResolution,
    footprint: Footprint,
) -> Option<LocalCell> {
    let max = resolution.max_anchor(footprint)?;
    Some(LocalCell::new(
        col.clamp(0, i64::from(max.col)) as u32,
        row.clamp(0, i64::from(max.row)) as u32,
    ))
}

/// Geometry of a single step, as seen by the grid math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepFrame {
    pub origin: Point,
    pub size: Size,
    pub resolution: GridResolution,
    pub expansion_factor: f64,
}

impl StepFrame {
    /// Builds a frame from a step origin and size.
    pub fn new(origin: Point, size: Size, config: &LayoutConfig) -> Self {
        Self {
            origin,
            size,
            resolution: step_grid_resolution(size, config.step_cell_size),
            expansion_factor: config.expansion_factor,
        }
    }

    /// Frame of a step object; `None` for icons and text.
    pub fn of(object: &CanvasObject, config: &LayoutConfig) -> Option<Self> {
        object
            .as_step()
            .map(|step| Self::new(object.position, step.size, config))
    }

    /// Pixel size of one internal cell, in canvas or expanded space.
    ///
    /// Zero-capacity axes report a zero cell size.
    pub fn cell_size(&self, expanded: bool) -> (f64, f64) {
        let zoom = if expanded { self.expansion_factor } else { 1.0 };
        let w = if self.resolution.cols == 0 {
            0.0
        } else {
            zoom * self.size.width / f64::from(self.resolution.cols)
        };
        let h = if self.resolution.rows == 0 {
            0.0
        } else {
            zoom * self.size.height / f64::from(self.resolution.rows)
        };
        (w, h)
    }

    /// Pixel size of the whole step in the requested space.
    pub fn view_size(&self, expanded: bool) -> Size {
        let zoom = if expanded { self.expansion_factor } else { 1.0 };
        Size::new(self.size.width * zoom, self.size.height * zoom)
    }
}

/// Converts a pixel position to the nearest valid anchor cell of a step.
///
/// In canvas space the step origin is subtracted first; in expanded space the
/// point is already step-relative. The result is clamped so the footprint
/// stays inside the grid. `None` means the step cannot hold the footprint.
pub fn pixel_to_local_cell(
    point: Point,
    frame: &StepFrame,
    footprint: Footprint,
    expanded: bool,
) -> Option<LocalCell> {
    if !frame.resolution.fits(footprint) {
        return None;
    }
    let (rel_x, rel_y) = if expanded {
        (point.x, point.y)
    } else {
        point.delta_from(frame.origin)
    };
    let (cell_w, cell_h) = frame.cell_size(expanded);
    let col = (rel_x / cell_w).round() as i64;
    let row = (rel_y / cell_h).round() as i64;
    clamp_local_cell(col, row, frame.resolution, footprint)
}

/// Pixel position of a cell's top-left corner, in canvas or expanded space.
pub fn local_cell_to_pixel(cell: LocalCell, frame: &StepFrame, expanded: bool) -> Point {
    let (cell_w, cell_h) = frame.cell_size(expanded);
    let x = f64::from(cell.col) * cell_w;
    let y = f64::from(cell.row) * cell_h;
    if expanded {
        Point::new(x, y)
    } else {
        frame.origin.offset(x, y)
    }
}
