//! Pixel and grid-cell geometry.
//!
//! Two coordinate spaces exist side by side: outer-canvas pixels (`Point`,
//! `Size`, `Bounds`) and integer cells inside a step's internal grid
//! (`LocalCell`, `Footprint`, `GridResolution`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Vector from `other` to `self`.
    pub fn delta_from(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    /// Whether both axes are within `tolerance` of `other`.
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Area in square pixels.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Width x height of an object in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    /// The footprint every catalog icon uses.
    pub const ICON: Footprint = Footprint {
        width: 2,
        height: 2,
    };

    /// Creates a new footprint.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel size of this footprint for a given cell edge length.
    pub fn to_pixels(self, cell_size: f64) -> Size {
        Size::new(
            f64::from(self.width) * cell_size,
            f64::from(self.height) * cell_size,
        )
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::ICON
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A (column, row) address inside a step's internal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalCell {
    pub col: u32,
    pub row: u32,
}

impl LocalCell {
    /// Creates a new cell address.
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Every cell covered by `footprint` when anchored at this cell, row-major.
    pub fn covered_cells(self, footprint: Footprint) -> Vec<LocalCell> {
        let mut cells = Vec::with_capacity((footprint.width * footprint.height) as usize);
        for row in self.row..self.row + footprint.height {
            for col in self.col..self.col + footprint.width {
                cells.push(LocalCell::new(col, row));
            }
        }
        cells
    }
}

impl fmt::Display for LocalCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Number of columns and rows in a step's internal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridResolution {
    pub cols: u32,
    pub rows: u32,
}

impl GridResolution {
    /// Creates a new resolution.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// A grid with zero cells on either axis holds nothing.
    pub fn has_capacity(&self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    /// Whether a footprint fits inside the grid at all.
    pub fn fits(&self, footprint: Footprint) -> bool {
        self.has_capacity() && footprint.width <= self.cols && footprint.height <= self.rows
    }

    /// Largest anchor cell a footprint may occupy, or `None` if it cannot fit.
    pub fn max_anchor(&self, footprint: Footprint) -> Option<LocalCell> {
        if !self.fits(footprint) {
            return None;
        }
        Some(LocalCell::new(
            self.cols - footprint.width,
            self.rows - footprint.height,
        ))
    }
}

impl fmt::Display for GridResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Axis-aligned bounding box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Creates bounds from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates bounds from a top-left origin and a size.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Inclusive containment test; points on the edge are inside.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether the two boxes come within `margin` of each other.
    ///
    /// With `margin == 0.0` this is strict intersection: touching edges do
    /// not count.
    pub fn intersects_with_margin(&self, other: &Bounds, margin: f64) -> bool {
        !(self.max_x + margin <= other.min_x
            || self.min_x - margin >= other.max_x
            || self.max_y + margin <= other.min_y
            || self.min_y - margin >= other.max_y)
    }

    /// Whether this box lies entirely inside `outer` (edges inclusive).
    pub fn is_within(&self, outer: &Bounds) -> bool {
        self.min_x >= outer.min_x
            && self.min_y >= outer.min_y
            && self.max_x <= outer.max_x
            && self.max_y <= outer.max_y
    }
}
