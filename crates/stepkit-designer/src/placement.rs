//! Placement engine: the per-gesture drag state machine.
//!
//! A gesture runs `begin_drag`, any number of `update_drag` calls, then
//! `end_drag` or `cancel_drag`. On the outer canvas every move is applied to
//! the store immediately, so release only ends the gesture. In the expanded
//! step view moves are previews and the store changes on release, and only
//! when the last preview was valid.

use serde::Serialize;
use stepkit_core::{LocalCell, ObjectId, Point};
use tracing::{debug, trace};

use crate::collision::{self, CellProbe};
use crate::grid::{self, StepFrame};
use crate::model::{Attachment, CanvasObject, ObjectKind};
use crate::object_store::ObjectStore;

/// What kind of object a canvas drag is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    Step,
    Icon,
    Text,
}

impl From<&ObjectKind> for DragKind {
    fn from(kind: &ObjectKind) -> Self {
        match kind {
            ObjectKind::Step(_) => DragKind::Step,
            ObjectKind::Icon(_) => DragKind::Icon,
            ObjectKind::Text(_) => DragKind::Text,
        }
    }
}

/// Ephemeral placement feedback. Never stored on an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragPreview {
    /// Step being targeted
    pub step_id: ObjectId,
    /// Clamped target cell, `None` when the step cannot hold the footprint
    pub cell: Option<LocalCell>,
    /// Snapped top-left corner, in canvas space or expanded space
    pub position: Point,
    pub valid: bool,
    pub occupied_cells: Vec<LocalCell>,
}

impl DragPreview {
    fn from_probe(step_id: ObjectId, probe: CellProbe, position: Point) -> Self {
        Self {
            step_id,
            cell: probe.cell,
            position,
            valid: probe.valid,
            occupied_cells: probe.occupied_cells,
        }
    }
}

/// Gesture state. Illegal combinations, such as dragging with nothing
/// captured, cannot be expressed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Moving an object on the outer canvas.
    Dragging {
        object_id: ObjectId,
        kind: DragKind,
        /// Pointer minus object top-left at pointer-down
        grab_offset: (f64, f64),
    },
    /// Moving an attached icon inside the expanded step view.
    DraggingInExpandedStep {
        object_id: ObjectId,
        step_id: ObjectId,
        /// Pointer minus the icon's expanded-space corner at pointer-down
        grab_offset: (f64, f64),
        /// Committed cell at pointer-down, restored on an invalid drop
        origin_cell: LocalCell,
        /// Latest evaluation, if the pointer has moved
        preview: Option<DragPreview>,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// The object captured by the current gesture.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { object_id, .. }
            | DragState::DraggingInExpandedStep { object_id, .. } => Some(*object_id),
        }
    }

    /// The preview of an expanded-view drag.
    pub fn preview(&self) -> Option<&DragPreview> {
        match self {
            DragState::DraggingInExpandedStep { preview, .. } => preview.as_ref(),
            _ => None,
        }
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DragOutcome {
    /// There was no gesture to end.
    NoGesture,
    /// A canvas drag ended; the last move is final.
    Released {
        object_id: ObjectId,
        position: Point,
        attachment: Option<Attachment>,
    },
    /// An expanded-view drag moved the icon to a new cell.
    Committed {
        object_id: ObjectId,
        step_id: ObjectId,
        cell: LocalCell,
    },
    /// An expanded-view drag was refused; the icon keeps its cell.
    Reverted {
        object_id: ObjectId,
        step_id: ObjectId,
        cell: LocalCell,
    },
    /// The gesture was cancelled.
    Cancelled { object_id: ObjectId },
}

/// Starts a gesture on `id` at `pointer`.
///
/// With a step expanded, only icons attached to it can be grabbed and the
/// pointer is read in expanded space. Returns false, leaving the state alone,
/// when a gesture is already running or the object cannot be grabbed.
pub fn begin_drag(
    store: &mut ObjectStore,
    state: &mut DragState,
    expanded_step: Option<ObjectId>,
    id: ObjectId,
    pointer: Point,
) -> bool {
    if !state.is_idle() {
        debug!("Ignoring begin_drag on {}: a gesture is already active", id);
        return false;
    }
    store.heal_attachment(id);
    let Some(obj) = store.get(id) else {
        debug!("Ignoring begin_drag on unknown object {}", id);
        return false;
    };

    let next = match expanded_step {
        Some(step_id) => {
            let (Some(attachment), Some(frame)) = (
                obj.attachment.filter(|a| a.step_id == step_id),
                store.step_frame(step_id),
            ) else {
                debug!("{} is not inside expanded step {}", id, step_id);
                return false;
            };
            let corner = grid::local_cell_to_pixel(attachment.cell, &frame, true);
            DragState::DraggingInExpandedStep {
                object_id: id,
                step_id,
                grab_offset: pointer.delta_from(corner),
                origin_cell: attachment.cell,
                preview: None,
            }
        }
        None => DragState::Dragging {
            object_id: id,
            kind: DragKind::from(&obj.kind),
            grab_offset: pointer.delta_from(obj.position),
        },
    };
    debug!("Drag started: {:?}", next);
    *state = next;
    true
}

/// Re-evaluates the gesture for a new pointer position.
///
/// Returns the preview to render, if any. A gesture whose object or step has
/// disappeared is dropped.
pub fn update_drag(
    store: &mut ObjectStore,
    state: &mut DragState,
    pointer: Point,
) -> Option<DragPreview> {
    match *state {
        DragState::Idle => None,
        DragState::Dragging {
            object_id,
            kind,
            grab_offset,
        } => {
            if !store.contains(object_id) {
                debug!("Dragged object {} vanished, ending gesture", object_id);
                *state = DragState::Idle;
                return None;
            }
            let proposed = pointer.offset(-grab_offset.0, -grab_offset.1);
            match kind {
                DragKind::Step => {
                    drag_step(store, object_id, proposed);
                    None
                }
                DragKind::Icon => drag_icon(store, object_id, proposed),
                DragKind::Text => {
                    snap_free(store, object_id, proposed);
                    None
                }
            }
        }
        DragState::DraggingInExpandedStep {
            object_id,
            step_id,
            grab_offset,
            ..
        } => {
            let proposed = pointer.offset(-grab_offset.0, -grab_offset.1);
            let (Some(obj), Some(frame)) = (store.get(object_id), store.step_frame(step_id)) else {
                debug!("Expanded drag target vanished, ending gesture");
                *state = DragState::Idle;
                return None;
            };
            let evaluated = evaluate_expanded(store, obj, step_id, &frame, proposed);
            trace!(
                "Expanded preview for {}: {:?} valid={}",
                object_id,
                evaluated.cell,
                evaluated.valid
            );
            if let DragState::DraggingInExpandedStep { preview, .. } = state {
                *preview = Some(evaluated.clone());
            }
            Some(evaluated)
        }
    }
}

/// Ends the gesture.
pub fn end_drag(store: &mut ObjectStore, state: &mut DragState) -> DragOutcome {
    let outcome = match std::mem::take(state) {
        DragState::Idle => DragOutcome::NoGesture,
        DragState::Dragging { object_id, .. } => match store.get(object_id) {
            Some(obj) => DragOutcome::Released {
                object_id,
                position: obj.position,
                attachment: obj.attachment,
            },
            None => DragOutcome::Cancelled { object_id },
        },
        DragState::DraggingInExpandedStep {
            object_id,
            step_id,
            origin_cell,
            preview,
            ..
        } => {
            let target = preview.filter(|p| p.valid).and_then(|p| p.cell);
            match target.map(|cell| store.move_attached(object_id, step_id, cell)) {
                Some(Ok(cell)) => DragOutcome::Committed {
                    object_id,
                    step_id,
                    cell,
                },
                Some(Err(err)) => {
                    debug!("Expanded drop of {} refused: {}", object_id, err);
                    DragOutcome::Reverted {
                        object_id,
                        step_id,
                        cell: origin_cell,
                    }
                }
                None => DragOutcome::Reverted {
                    object_id,
                    step_id,
                    cell: origin_cell,
                },
            }
        }
    };
    debug!("Drag ended: {:?}", outcome);
    outcome
}

/// Abandons the gesture. Canvas moves already applied are kept; an expanded
/// preview is discarded.
pub fn cancel_drag(state: &mut DragState) -> DragOutcome {
    match std::mem::take(state).object_id() {
        Some(object_id) => {
            debug!("Drag of {} cancelled", object_id);
            DragOutcome::Cancelled { object_id }
        }
        None => DragOutcome::NoGesture,
    }
}

fn drag_step(store: &mut ObjectStore, id: ObjectId, proposed: Point) {
    let Some(moving) = store.step_box(id) else {
        return;
    };
    let others = store.step_boxes();
    let resolution = collision::resolve_step_push(&moving, proposed, &others, store.config());
    if !resolution.displaced.is_empty() {
        debug!(
            "Step {} pushed {} step(s) away",
            id,
            resolution.displaced.len()
        );
    }
    if let Err(err) = store.apply_push(id, &resolution) {
        debug!("Step drag of {} ignored: {}", id, err);
    }
}

/// Snaps a detached object to the free grid.
fn snap_free(store: &mut ObjectStore, id: ObjectId, proposed: Point) {
    let snapped = grid::canvas_to_free_grid(proposed, store.config().free_grid_size);
    if let Err(err) = store.move_free(id, snapped) {
        debug!("Free move of {} ignored: {}", id, err);
    }
}

/// Picks the step that captures a point: smallest area first, then draw order.
pub fn claiming_step(store: &ObjectStore, point: Point) -> Option<(ObjectId, StepFrame)> {
    let mut best: Option<(f64, ObjectId, StepFrame)> = None;
    for step in store.steps() {
        let Some(frame) = StepFrame::of(step, store.config()) else {
            continue;
        };
        if !collision::is_point_in_step_bounds(point, &frame) {
            continue;
        }
        let area = frame.size.area();
        if best.as_ref().is_none_or(|(best_area, _, _)| area < *best_area) {
            best = Some((area, step.id, frame));
        }
    }
    best.map(|(_, id, frame)| {
        trace!("Step {} claims point {}", id, point);
        (id, frame)
    })
}

fn drag_icon(store: &mut ObjectStore, id: ObjectId, proposed: Point) -> Option<DragPreview> {
    let footprint = store.get(id)?.footprint;
    let size = footprint.to_pixels(store.config().step_cell_size);
    let center = proposed.offset(size.width / 2.0, size.height / 2.0);

    let claim = claiming_step(store, center).map(|(step_id, frame)| {
        let cell = grid::pixel_to_local_cell(proposed, &frame, footprint, false);
        let probe = collision::probe_cell_region(store, step_id, cell, footprint, Some(id));
        let position = cell
            .map(|c| grid::local_cell_to_pixel(c, &frame, false))
            .unwrap_or(proposed);
        DragPreview::from_probe(step_id, probe, position)
    });

    match claim {
        Some(preview) if preview.valid => {
            if let Some(cell) = preview.cell {
                if let Err(err) = store.move_attached(id, preview.step_id, cell) {
                    debug!("Attach of {} refused: {}", id, err);
                }
            }
            Some(preview)
        }
        other => {
            snap_free(store, id, proposed);
            other
        }
    }
}

fn evaluate_expanded(
    store: &ObjectStore,
    obj: &CanvasObject,
    step_id: ObjectId,
    frame: &StepFrame,
    proposed: Point,
) -> DragPreview {
    let cell = grid::pixel_to_local_cell(proposed, frame, obj.footprint, true);
    let probe = collision::probe_cell_region(store, step_id, cell, obj.footprint, Some(obj.id));
    let position = cell
        .map(|c| grid::local_cell_to_pixel(c, frame, true))
        .unwrap_or(proposed);
    DragPreview::from_probe(step_id, probe, position)
}
