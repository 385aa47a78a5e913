//! Editor session: the interface the host UI talks to.
//!
//! The session owns the object store, the drag state and the expanded-step
//! id. Layout refusals never reach the host as errors; they are logged and
//! reported as flags or `None`.

use serde::Serialize;
use stepkit_core::{Footprint, LayoutConfig, ObjectId, Point, Result};
use tracing::{debug, info, warn};

use crate::model::{CanvasObject, ObjectTemplate, PropertyUpdate};
use crate::object_store::ObjectStore;
use crate::placement::{self, DragOutcome, DragPreview, DragState};
use crate::templates::QuickKit;

/// Result of a pointer move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragFrame {
    /// All objects in draw order after the move
    pub objects: Vec<CanvasObject>,
    pub preview: Option<DragPreview>,
}

/// A single-user editing session over one canvas.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    objects: ObjectStore,
    drag_state: DragState,
    expanded_step_id: Option<ObjectId>,
}

impl EditorSession {
    /// Creates a session with the default layout constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with custom layout constants.
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            objects: ObjectStore::new(config),
            drag_state: DragState::Idle,
            expanded_step_id: None,
        })
    }

    /// Creates a session from an existing layout, repairing it as needed.
    pub fn from_snapshot(config: LayoutConfig, objects: Vec<CanvasObject>) -> Result<Self> {
        let mut session = Self::with_config(config)?;
        let repairs = session.objects.load_snapshot(objects);
        info!(
            "Loaded {} objects ({} repaired)",
            session.objects.len(),
            repairs
        );
        Ok(session)
    }

    pub fn config(&self) -> &LayoutConfig {
        self.objects.config()
    }

    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// All objects in draw order.
    pub fn snapshot(&self) -> Vec<CanvasObject> {
        self.objects.snapshot()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag_state
    }

    // --- Gestures ---

    /// Pointer-down on an object. Ignored while another gesture is active.
    pub fn begin_drag(&mut self, id: ObjectId, pointer: Point) -> bool {
        placement::begin_drag(
            &mut self.objects,
            &mut self.drag_state,
            self.expanded_step_id,
            id,
            pointer,
        )
    }

    /// Pointer-move. Returns the new layout and any placement preview.
    pub fn update_drag(&mut self, pointer: Point) -> DragFrame {
        let preview = placement::update_drag(&mut self.objects, &mut self.drag_state, pointer);
        DragFrame {
            objects: self.objects.snapshot(),
            preview,
        }
    }

    /// Pointer-up.
    pub fn end_drag(&mut self) -> DragOutcome {
        placement::end_drag(&mut self.objects, &mut self.drag_state)
    }

    /// Escape or pointer lost.
    pub fn cancel_drag(&mut self) -> DragOutcome {
        placement::cancel_drag(&mut self.drag_state)
    }

    // --- Object lifecycle ---

    pub fn add_icon(
        &mut self,
        glyph: impl Into<String>,
        label: impl Into<String>,
        footprint: Footprint,
    ) -> ObjectId {
        self.objects.add_icon(glyph, label, footprint)
    }

    pub fn add_text(&mut self) -> ObjectId {
        self.objects.add_text()
    }

    /// Adds a step of `footprint` preset cells.
    pub fn add_step(&mut self, footprint: Footprint) -> ObjectId {
        self.objects.add_step(footprint)
    }

    pub fn add_from_template(&mut self, template: ObjectTemplate) -> ObjectId {
        self.objects.add(template)
    }

    /// Adds a quick-create kit's starter objects.
    pub fn apply_kit(&mut self, kit: QuickKit) -> Vec<ObjectId> {
        match kit.populate(&mut self.objects) {
            Ok(ids) => ids,
            Err(err) => {
                warn!("Kit {} could not be laid out: {}", kit, err);
                Vec::new()
            }
        }
    }

    /// Deletes an object. Returns false if it did not exist.
    ///
    /// A gesture on the object is cancelled, and deleting the expanded step
    /// collapses the view.
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        let drag_touches = self.drag_state.object_id() == Some(id)
            || matches!(
                self.drag_state,
                DragState::DraggingInExpandedStep { step_id, .. } if step_id == id
            );
        if drag_touches {
            self.cancel_drag();
        }
        if self.expanded_step_id == Some(id) {
            self.collapse_step();
        }
        match self.objects.remove(id) {
            Ok(_) => true,
            Err(err) => {
                debug!("Delete ignored: {}", err);
                false
            }
        }
    }

    /// Duplicates an object, returning the new id.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.objects
            .duplicate(id)
            .map_err(|err| debug!("Duplicate ignored: {}", err))
            .ok()
    }

    /// Applies a property edit. Returns false if it was refused.
    pub fn update_property(&mut self, id: ObjectId, update: PropertyUpdate) -> bool {
        match self.objects.update_property(id, update) {
            Ok(()) => true,
            Err(err) => {
                debug!("Property update ignored: {}", err);
                false
            }
        }
    }

    // --- Expanded view ---

    /// Opens the expanded view of a step. Any running gesture is cancelled.
    pub fn expand_step(&mut self, id: ObjectId) -> bool {
        if self.objects.step_frame(id).is_none() {
            debug!("Cannot expand {}: not a step", id);
            return false;
        }
        self.cancel_drag();
        self.expanded_step_id = Some(id);
        debug!("Expanded step {}", id);
        true
    }

    /// Closes the expanded view, discarding an uncommitted expanded move.
    pub fn collapse_step(&mut self) {
        if self.expanded_step_id.take().is_some() {
            self.cancel_drag();
        }
    }

    pub fn expanded_step(&self) -> Option<ObjectId> {
        self.expanded_step_id
    }
}
