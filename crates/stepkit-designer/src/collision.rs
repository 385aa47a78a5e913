//! Collision resolution: cell occupancy inside steps and step push-away on
//! the outer canvas.
//!
//! Occupancy is an exact half-open rectangle test in local-cell space. Steps
//! use a pixel margin instead, so that neighbours start moving before their
//! edges touch.

use serde::Serialize;
use stepkit_core::{Bounds, Footprint, LayoutConfig, LocalCell, ObjectId, Point, Size};

use crate::grid::StepFrame;
use crate::object_store::ObjectStore;

/// Whether two footprints anchored at `a` and `b` share at least one cell.
pub fn cells_overlap(a: LocalCell, a_fp: Footprint, b: LocalCell, b_fp: Footprint) -> bool {
    a.col < b.col + b_fp.width
        && b.col < a.col + a_fp.width
        && a.row < b.row + b_fp.height
        && b.row < a.row + a_fp.height
}

/// First object attached to `step_id` whose footprint overlaps the candidate
/// region, ignoring `exclude`.
pub fn first_occupant(
    store: &ObjectStore,
    step_id: ObjectId,
    cell: LocalCell,
    footprint: Footprint,
    exclude: Option<ObjectId>,
) -> Option<ObjectId> {
    store
        .attached_to(step_id)
        .filter(|obj| Some(obj.id) != exclude)
        .find(|obj| {
            obj.local_cell()
                .is_some_and(|other| cells_overlap(cell, footprint, other, obj.footprint))
        })
        .map(|obj| obj.id)
}

/// True iff no other object attached to the step overlaps the candidate region.
pub fn is_cell_region_free(
    store: &ObjectStore,
    step_id: ObjectId,
    cell: LocalCell,
    footprint: Footprint,
    exclude: Option<ObjectId>,
) -> bool {
    first_occupant(store, step_id, cell, footprint, exclude).is_none()
}

/// Verdict for a candidate placement inside a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellProbe {
    /// Clamped anchor cell, or `None` when the step cannot hold the footprint
    pub cell: Option<LocalCell>,
    /// Whether the placement may be committed
    pub valid: bool,
    /// Cells the footprint would cover at `cell`
    pub occupied_cells: Vec<LocalCell>,
    /// The first object in the way, if any
    pub blocked_by: Option<ObjectId>,
}

impl CellProbe {
    /// A probe for a step that cannot hold the footprint.
    pub fn no_capacity() -> Self {
        Self {
            cell: None,
            valid: false,
            occupied_cells: Vec::new(),
            blocked_by: None,
        }
    }
}

/// Evaluates placing `footprint` at an already clamped `cell` of a step.
pub fn probe_cell_region(
    store: &ObjectStore,
    step_id: ObjectId,
    cell: Option<LocalCell>,
    footprint: Footprint,
    exclude: Option<ObjectId>,
) -> CellProbe {
    let Some(cell) = cell else {
        return CellProbe::no_capacity();
    };
    let blocked_by = first_occupant(store, step_id, cell, footprint, exclude);
    CellProbe {
        cell: Some(cell),
        valid: blocked_by.is_none(),
        occupied_cells: cell.covered_cells(footprint),
        blocked_by,
    }
}

/// Inclusive containment test against a step's outer-canvas bounds.
pub fn is_point_in_step_bounds(point: Point, frame: &StepFrame) -> bool {
    Bounds::from_origin_size(frame.origin, frame.size).contains_point(point.x, point.y)
}

/// A step's box on the outer canvas, detached from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepBox {
    pub id: ObjectId,
    pub origin: Point,
    pub size: Size,
}

impl StepBox {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_origin_size(self.origin, self.size)
    }
}

/// A step moved out of the way by a push.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Displacement {
    pub step_id: ObjectId,
    pub from: Point,
    pub to: Point,
}

/// Result of moving a step with push-away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushResolution {
    /// Accepted origin of the moving step, already clamped to the canvas
    pub position: Point,
    /// Steps that actually moved, in the order they were examined
    pub displaced: Vec<Displacement>,
}

/// Moves `moving` towards `proposed` and pushes overlapping steps away.
///
/// The moving step is clamped to the canvas and always accepts that position.
/// Every other step within `push_margin` of it is pushed along the axis of
/// greater centre delta (ties go horizontal) by at least `push_distance`, and
/// at least `min_push_distance` clear of the moving edge, then clamped back
/// into the canvas. Pushes do not cascade.
pub fn resolve_step_push(
    moving: &StepBox,
    proposed: Point,
    others: &[StepBox],
    config: &LayoutConfig,
) -> PushResolution {
    let position = config.clamp_origin(proposed, moving.size);
    let dragged = Bounds::from_origin_size(position, moving.size);
    let (center_x1, center_y1) = dragged.center();

    let mut displaced = Vec::new();
    for other in others.iter().filter(|s| s.id != moving.id) {
        let bounds = other.bounds();
        if !dragged.intersects_with_margin(&bounds, config.push_margin) {
            continue;
        }

        let (center_x2, center_y2) = bounds.center();
        let delta_x = center_x2 - center_x1;
        let delta_y = center_y2 - center_y1;

        let mut target = other.origin;
        if delta_x.abs() >= delta_y.abs() {
            target.x = if delta_x > 0.0 {
                (dragged.max_x + config.min_push_distance).max(other.origin.x + config.push_distance)
            } else {
                (dragged.min_x - other.size.width - config.min_push_distance)
                    .min(other.origin.x - config.push_distance)
            };
        } else {
            target.y = if delta_y > 0.0 {
                (dragged.max_y + config.min_push_distance).max(other.origin.y + config.push_distance)
            } else {
                (dragged.min_y - other.size.height - config.min_push_distance)
                    .min(other.origin.y - config.push_distance)
            };
        }

        let target = config.clamp_origin(target, other.size);
        if target != other.origin {
            displaced.push(Displacement {
                step_id: other.id,
                from: other.origin,
                to: target,
            });
        }
    }

    PushResolution {
        position,
        displaced,
    }
}
