//! Authoritative collection of canvas objects.
//!
//! `ObjectStore` owns every placed object, keyed by id with a separate draw
//! order, and is the only place objects are mutated. Each mutation either
//! keeps the layout invariants or refuses with a [`LayoutError`] and leaves the
//! store untouched:
//!
//! - an attachment names a step that exists, and only icons attach;
//! - an attached cell keeps the footprint inside the step grid;
//! - attached footprints in one step never overlap;
//! - an attached object's position is the pixel equivalent of its cell;
//! - step boxes stay inside the canvas.

use std::collections::HashMap;

use stepkit_core::{
    Footprint, LayoutConfig, LayoutError, LocalCell, ObjectId, Point, Result, Size,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::collision::{self, PushResolution, StepBox};
use crate::grid::{self, StepFrame};
use crate::model::{
    Attachment, CanvasObject, FontWeight, IconAttrs, ObjectKind, ObjectTemplate, PropertyUpdate,
    StepAttrs, TextAttrs, DEFAULT_FONT_SIZE, DEFAULT_INK_COLOR, DEFAULT_STEP_COLOR, DEFAULT_TEXT,
};

/// Where `add_icon` places new icons.
pub const NEW_ICON_POSITION: Point = Point { x: 100.0, y: 200.0 };
/// Where `add_text` places new text boxes.
pub const NEW_TEXT_POSITION: Point = Point { x: 50.0, y: 100.0 };
/// Where `add_step` places new steps.
pub const NEW_STEP_POSITION: Point = Point { x: 50.0, y: 150.0 };

/// Pixel tolerance used when checking cached positions of attached objects.
pub const POSITION_TOLERANCE: f64 = 1.0;

/// A broken layout invariant found by [`ObjectStore::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("{id} is attached to missing step {step_id}")]
    DanglingAttachment { id: ObjectId, step_id: ObjectId },

    #[error("{id} is a {kind} and cannot be attached")]
    NotAttachable { id: ObjectId, kind: &'static str },

    #[error("{id} cell {cell} is outside the grid of step {step_id}")]
    CellOutOfRange {
        id: ObjectId,
        step_id: ObjectId,
        cell: LocalCell,
    },

    #[error("{a} and {b} overlap inside step {step_id}")]
    Overlap {
        a: ObjectId,
        b: ObjectId,
        step_id: ObjectId,
    },

    #[error("{id} position {actual} does not match its cell position {expected}")]
    StalePosition {
        id: ObjectId,
        expected: Point,
        actual: Point,
    },

    #[error("step {id} lies outside the canvas")]
    StepOutOfBounds { id: ObjectId },
}

/// Id-indexed object collection with a stable draw order.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects: HashMap<ObjectId, CanvasObject>,
    order: Vec<ObjectId>,
    next_id: u64,
    config: LayoutConfig,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl ObjectStore {
    /// Creates an empty store using the given layout constants.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            objects: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.get(&id)
    }

    /// Iterates objects in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    /// Iterates steps in draw order.
    pub fn steps(&self) -> impl Iterator<Item = &CanvasObject> {
        self.iter().filter(|obj| obj.is_step())
    }

    /// Iterates objects attached to `step_id`, in draw order.
    pub fn attached_to(&self, step_id: ObjectId) -> impl Iterator<Item = &CanvasObject> {
        self.iter()
            .filter(move |obj| obj.attached_step() == Some(step_id))
    }

    /// Clones every object in draw order.
    pub fn snapshot(&self) -> Vec<CanvasObject> {
        self.iter().cloned().collect()
    }

    /// Grid frame of a step, or `None` if `id` is not a step.
    pub fn step_frame(&self, id: ObjectId) -> Option<StepFrame> {
        self.get(id)
            .and_then(|obj| StepFrame::of(obj, &self.config))
    }

    /// Canvas box of a step, or `None` if `id` is not a step.
    pub fn step_box(&self, id: ObjectId) -> Option<StepBox> {
        let obj = self.get(id)?;
        let step = obj.as_step()?;
        Some(StepBox {
            id,
            origin: obj.position,
            size: step.size,
        })
    }

    /// Canvas boxes of every step, in draw order.
    pub fn step_boxes(&self) -> Vec<StepBox> {
        self.steps()
            .filter_map(|obj| self.step_box(obj.id))
            .collect()
    }

    fn generate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The `order` a newly created step receives.
    pub fn next_step_order(&self) -> u32 {
        self.steps()
            .filter_map(|obj| obj.as_step().map(|s| s.order))
            .max()
            .unwrap_or(0)
            + 1
    }

    fn insert(&mut self, object: CanvasObject) -> ObjectId {
        let id = object.id;
        self.objects.insert(id, object);
        self.order.push(id);
        id
    }

    /// Creates an object from a template at its default position.
    pub fn add(&mut self, template: ObjectTemplate) -> ObjectId {
        let id = self.generate_id();
        let object = match template {
            ObjectTemplate::Icon {
                glyph,
                label,
                footprint,
            } => CanvasObject {
                id,
                name: label.clone(),
                position: NEW_ICON_POSITION,
                footprint,
                attachment: None,
                kind: ObjectKind::Icon(IconAttrs {
                    glyph,
                    label,
                    color: DEFAULT_INK_COLOR.to_string(),
                }),
            },
            ObjectTemplate::Text { text } => CanvasObject {
                id,
                name: "Text".to_string(),
                position: NEW_TEXT_POSITION,
                footprint: Footprint::new(1, 1),
                attachment: None,
                kind: ObjectKind::Text(TextAttrs {
                    text: text.unwrap_or_else(|| DEFAULT_TEXT.to_string()),
                    font_size: DEFAULT_FONT_SIZE,
                    font_weight: FontWeight::Normal,
                    rotation: 0.0,
                    color: DEFAULT_INK_COLOR.to_string(),
                }),
            },
            ObjectTemplate::Step { footprint } => {
                let order = self.next_step_order();
                let size = footprint.to_pixels(self.config.preset_cell_size);
                CanvasObject {
                    id,
                    name: format!("STEP {order}"),
                    position: self.config.clamp_origin(NEW_STEP_POSITION, size),
                    footprint,
                    attachment: None,
                    kind: ObjectKind::Step(StepAttrs {
                        size,
                        color_theme: DEFAULT_STEP_COLOR.to_string(),
                        order,
                        depth_hint: self.config.default_depth_hint,
                    }),
                }
            }
        };
        debug!("Added {} {}", object.kind_name(), id);
        self.insert(object)
    }

    /// Adds an icon at the default icon position.
    pub fn add_icon(
        &mut self,
        glyph: impl Into<String>,
        label: impl Into<String>,
        footprint: Footprint,
    ) -> ObjectId {
        self.add(ObjectTemplate::Icon {
            glyph: glyph.into(),
            label: label.into(),
            footprint,
        })
    }

    /// Adds a text box with default content.
    pub fn add_text(&mut self) -> ObjectId {
        self.add(ObjectTemplate::Text { text: None })
    }

    /// Adds a step sized `footprint * preset_cell_size` pixels.
    pub fn add_step(&mut self, footprint: Footprint) -> ObjectId {
        self.add(ObjectTemplate::Step { footprint })
    }

    /// Removes an object.
    ///
    /// Removing a step leaves its children on the canvas, detached, and
    /// renumbers the remaining steps to `1..=n`.
    pub fn remove(&mut self, id: ObjectId) -> Result<CanvasObject> {
        let removed = self
            .objects
            .remove(&id)
            .ok_or(LayoutError::InvalidTarget { id })?;
        self.order.retain(|other| *other != id);

        if removed.is_step() {
            let children: Vec<ObjectId> = self.attached_to(id).map(|obj| obj.id).collect();
            for child in children {
                if let Some(obj) = self.objects.get_mut(&child) {
                    obj.attachment = None;
                }
            }
            self.renumber_steps();
        }
        debug!("Removed {} {}", removed.kind_name(), id);
        Ok(removed)
    }

    fn renumber_steps(&mut self) {
        let mut steps: Vec<(u32, usize, ObjectId)> = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                self.objects
                    .get(id)
                    .and_then(|obj| obj.as_step())
                    .map(|step| (step.order, index, *id))
            })
            .collect();
        steps.sort();
        for (n, (_, _, id)) in steps.into_iter().enumerate() {
            if let Some(step) = self.objects.get_mut(&id).and_then(|o| o.as_step_mut()) {
                step.order = n as u32 + 1;
            }
        }
    }

    /// Clones an object under a fresh id, offset by `duplicate_offset`.
    ///
    /// Copies are never attached. A copied step gets the next `order` and is
    /// clamped into the canvas.
    pub fn duplicate(&mut self, id: ObjectId) -> Result<ObjectId> {
        self.heal_attachment(id);
        let source = self.get(id).ok_or(LayoutError::InvalidTarget { id })?;

        let mut copy = source.clone();
        let offset = self.config.duplicate_offset;
        copy.position = source.position.offset(offset, offset);
        copy.attachment = None;
        copy.name = format!("{} copy", source.name);

        let next_order = self.next_step_order();
        if let Some(step) = copy.as_step_mut() {
            step.order = next_order;
        }
        if let Some(size) = copy.as_step().map(|s| s.size) {
            copy.position = self.config.clamp_origin(copy.position, size);
        }

        let new_id = self.generate_id();
        copy.id = new_id;
        debug!("Duplicated {} as {}", id, new_id);
        Ok(self.insert(copy))
    }

    /// Applies a typed property edit.
    pub fn update_property(&mut self, id: ObjectId, update: PropertyUpdate) -> Result<()> {
        self.heal_attachment(id);
        let obj = self.get(id).ok_or(LayoutError::InvalidTarget { id })?;
        let mismatch = LayoutError::PropertyMismatch {
            id,
            kind: obj.kind_name(),
            property: update.name(),
        };

        match update {
            PropertyUpdate::Position(position) => {
                self.move_free(id, position)?;
            }
            PropertyUpdate::StepSize(size) => {
                if !obj.is_step() {
                    return Err(mismatch);
                }
                self.resize_step(id, size);
            }
            update => {
                let obj = self
                    .objects
                    .get_mut(&id)
                    .ok_or(LayoutError::InvalidTarget { id })?;
                match (update, &mut obj.kind) {
                    (PropertyUpdate::Name(name), _) => obj.name = name,
                    (PropertyUpdate::Color(color), ObjectKind::Icon(icon)) => icon.color = color,
                    (PropertyUpdate::Color(color), ObjectKind::Text(text)) => text.color = color,
                    (PropertyUpdate::Glyph(glyph), ObjectKind::Icon(icon)) => icon.glyph = glyph,
                    (PropertyUpdate::Label(label), ObjectKind::Icon(icon)) => icon.label = label,
                    (PropertyUpdate::Text(content), ObjectKind::Text(text)) => text.text = content,
                    (PropertyUpdate::FontSize(size), ObjectKind::Text(text)) => {
                        text.font_size = size
                    }
                    (PropertyUpdate::FontWeight(weight), ObjectKind::Text(text)) => {
                        text.font_weight = weight
                    }
                    (PropertyUpdate::Rotation(degrees), ObjectKind::Text(text)) => {
                        text.rotation = degrees
                    }
                    (PropertyUpdate::StepColor(color), ObjectKind::Step(step)) => {
                        step.color_theme = color
                    }
                    (PropertyUpdate::DepthHint(depth), ObjectKind::Step(step)) => {
                        step.depth_hint = depth
                    }
                    _ => return Err(mismatch),
                }
            }
        }
        Ok(())
    }

    /// Resizes a step, keeps it on the canvas and re-fits its children.
    ///
    /// The preset footprint is re-derived from the new size. Children are
    /// re-clamped into the new grid in draw order; a child that no longer
    /// fits, or whose clamped cell is taken by an earlier child, is detached
    /// at its current pixel position. Neighbouring steps the grown step now
    /// crowds are pushed away as if it had been dragged in place.
    fn resize_step(&mut self, id: ObjectId, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        let cell = self.config.preset_cell_size;
        let preset_cells = |pixels: f64| (pixels / cell).round().max(1.0) as u32;
        let footprint = Footprint::new(preset_cells(size.width), preset_cells(size.height));
        let Some(obj) = self.objects.get_mut(&id) else {
            return;
        };
        obj.position = self.config.clamp_origin(obj.position, size);
        obj.footprint = footprint;
        if let Some(step) = obj.as_step_mut() {
            step.size = size;
        }

        let Some(frame) = self.step_frame(id) else {
            return;
        };
        let children: Vec<(ObjectId, LocalCell, Footprint)> = self
            .attached_to(id)
            .filter_map(|obj| obj.local_cell().map(|cell| (obj.id, cell, obj.footprint)))
            .collect();

        // Detach everything first so re-fitting only sees already placed children.
        for (child, _, _) in &children {
            if let Some(obj) = self.objects.get_mut(child) {
                obj.attachment = None;
            }
        }
        for (child, cell, footprint) in children {
            let refit = grid::clamp_local_cell(
                i64::from(cell.col),
                i64::from(cell.row),
                frame.resolution,
                footprint,
            )
            .filter(|cell| collision::is_cell_region_free(self, id, *cell, footprint, Some(child)));

            let Some(obj) = self.objects.get_mut(&child) else {
                continue;
            };
            match refit {
                Some(cell) => {
                    obj.attachment = Some(Attachment { step_id: id, cell });
                    obj.position = grid::local_cell_to_pixel(cell, &frame, false);
                }
                None => {
                    debug!("{} no longer fits step {} after resize, detached", child, id);
                }
            }
        }

        if let Some(resized) = self.step_box(id) {
            let others = self.step_boxes();
            let resolution =
                collision::resolve_step_push(&resized, resized.origin, &others, &self.config);
            if !resolution.displaced.is_empty() {
                debug!("Resizing {} pushed {} steps", id, resolution.displaced.len());
                if let Err(err) = self.apply_push(id, &resolution) {
                    debug!("Push after resize ignored: {}", err);
                }
            }
        }
    }

    /// Attaches an icon to a step cell.
    ///
    /// The requested cell is clamped into the step grid, then checked for
    /// occupancy. Returns the committed cell.
    pub fn move_attached(
        &mut self,
        id: ObjectId,
        step_id: ObjectId,
        cell: LocalCell,
    ) -> Result<LocalCell> {
        self.heal_attachment(id);
        let obj = self.get(id).ok_or(LayoutError::InvalidTarget { id })?;
        if !obj.is_icon() {
            return Err(LayoutError::NotAttachable { id });
        }
        let footprint = obj.footprint;
        let frame = self
            .step_frame(step_id)
            .ok_or(LayoutError::InvalidTarget { id: step_id })?;

        let cell = grid::clamp_local_cell(
            i64::from(cell.col),
            i64::from(cell.row),
            frame.resolution,
            footprint,
        )
        .ok_or(LayoutError::CapacityExceeded {
            step_id,
            resolution: frame.resolution,
            footprint,
        })?;

        if let Some(occupant) = collision::first_occupant(self, step_id, cell, footprint, Some(id)) {
            return Err(LayoutError::OverlapConflict {
                step_id,
                cell,
                occupant,
            });
        }

        let obj = self
            .objects
            .get_mut(&id)
            .ok_or(LayoutError::InvalidTarget { id })?;
        obj.attachment = Some(Attachment { step_id, cell });
        obj.position = grid::local_cell_to_pixel(cell, &frame, false);
        Ok(cell)
    }

    /// Places an object freely on the canvas, clearing any attachment.
    ///
    /// Steps are clamped into the canvas and carry their children along.
    /// Returns the accepted position.
    pub fn move_free(&mut self, id: ObjectId, position: Point) -> Result<Point> {
        let obj = self
            .objects
            .get_mut(&id)
            .ok_or(LayoutError::InvalidTarget { id })?;
        match obj.as_step().map(|s| s.size) {
            Some(size) => {
                let accepted = self.config.clamp_origin(position, size);
                self.translate_step(id, accepted);
                Ok(accepted)
            }
            None => {
                obj.attachment = None;
                obj.position = position;
                Ok(position)
            }
        }
    }

    /// Moves a step's origin and re-derives its children's positions.
    fn translate_step(&mut self, id: ObjectId, origin: Point) {
        let Some(obj) = self.objects.get_mut(&id) else {
            return;
        };
        obj.position = origin;
        let Some(frame) = self.step_frame(id) else {
            return;
        };
        let children: Vec<(ObjectId, LocalCell)> = self
            .attached_to(id)
            .filter_map(|obj| obj.local_cell().map(|cell| (obj.id, cell)))
            .collect();
        for (child, cell) in children {
            if let Some(obj) = self.objects.get_mut(&child) {
                obj.position = grid::local_cell_to_pixel(cell, &frame, false);
            }
        }
    }

    /// Applies a push resolution in one transition: the moving step, every
    /// displaced step, and all of their children.
    pub fn apply_push(&mut self, moving: ObjectId, resolution: &PushResolution) -> Result<()> {
        if self.step_box(moving).is_none() {
            return Err(LayoutError::InvalidTarget { id: moving });
        }
        self.translate_step(moving, resolution.position);
        for displacement in &resolution.displaced {
            if self.step_box(displacement.step_id).is_some() {
                self.translate_step(displacement.step_id, displacement.to);
            }
        }
        Ok(())
    }

    /// Clears an attachment that points at a missing step.
    ///
    /// Returns true if something was repaired.
    pub fn heal_attachment(&mut self, id: ObjectId) -> bool {
        let Some(step_id) = self.get(id).and_then(|obj| obj.attached_step()) else {
            return false;
        };
        if self.get(step_id).is_some_and(|step| step.is_step()) {
            return false;
        }
        if let Some(obj) = self.objects.get_mut(&id) {
            warn!("Clearing dangling attachment of {} to {}", id, step_id);
            obj.attachment = None;
        }
        true
    }

    /// Replaces the store contents with externally supplied objects.
    ///
    /// Ids are kept; the id counter continues after the largest one. The input
    /// is repaired rather than rejected: duplicate ids and `u64::MAX` are
    /// dropped, steps are clamped into the canvas, and attachments that are
    /// dangling, nested, out of range or overlapping an earlier sibling are
    /// detached. Returns the number of repairs made.
    pub fn load_snapshot(&mut self, objects: Vec<CanvasObject>) -> usize {
        self.objects.clear();
        self.order.clear();
        let mut repairs = 0;

        for mut obj in objects {
            if self.objects.contains_key(&obj.id) {
                warn!("Dropping duplicate object id {}", obj.id);
                repairs += 1;
                continue;
            }
            if let Some(size) = obj.as_step().map(|s| s.size) {
                let clamped = self.config.clamp_origin(obj.position, size);
                if clamped != obj.position {
                    obj.position = clamped;
                    repairs += 1;
                }
            }
            let Some(after) = obj.id.0.checked_add(1) else {
                warn!("Dropping object with reserved id {}", obj.id);
                repairs += 1;
                continue;
            };
            self.next_id = self.next_id.max(after);
            self.insert(obj);
        }

        let attached: Vec<(ObjectId, Attachment)> = self
            .iter()
            .filter_map(|obj| obj.attachment.map(|a| (obj.id, a)))
            .collect();
        // Detach everything first, then re-attach in draw order so earlier
        // siblings win overlaps.
        for (id, _) in &attached {
            if let Some(obj) = self.objects.get_mut(id) {
                obj.attachment = None;
            }
        }
        for (id, attachment) in &attached {
            if self.move_attached(*id, attachment.step_id, attachment.cell) != Ok(attachment.cell) {
                warn!("Detached {} while loading snapshot", id);
                repairs += 1;
            }
        }
        repairs
    }

    /// Checks every layout invariant and reports all violations.
    pub fn validate(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        let canvas = self.config.canvas_bounds();

        for obj in self.iter() {
            if obj.is_step() && !obj.bounds(&self.config).is_within(&canvas) {
                let size = obj.pixel_size(&self.config);
                // Oversized steps are pinned at the origin, which is allowed.
                if self.config.clamp_origin(obj.position, size) != obj.position {
                    violations.push(InvariantViolation::StepOutOfBounds { id: obj.id });
                }
            }

            let Some(attachment) = obj.attachment else {
                continue;
            };
            if !obj.is_icon() {
                violations.push(InvariantViolation::NotAttachable {
                    id: obj.id,
                    kind: obj.kind_name(),
                });
            }
            let Some(frame) = self.step_frame(attachment.step_id) else {
                violations.push(InvariantViolation::DanglingAttachment {
                    id: obj.id,
                    step_id: attachment.step_id,
                });
                continue;
            };
            let in_range = frame
                .resolution
                .max_anchor(obj.footprint)
                .is_some_and(|max| attachment.cell.col <= max.col && attachment.cell.row <= max.row);
            if !in_range {
                violations.push(InvariantViolation::CellOutOfRange {
                    id: obj.id,
                    step_id: attachment.step_id,
                    cell: attachment.cell,
                });
            }
            let expected = grid::local_cell_to_pixel(attachment.cell, &frame, false);
            if !expected.approx_eq(obj.position, POSITION_TOLERANCE) {
                violations.push(InvariantViolation::StalePosition {
                    id: obj.id,
                    expected,
                    actual: obj.position,
                });
            }
        }

        for step in self.steps() {
            let children: Vec<&CanvasObject> = self.attached_to(step.id).collect();
            for (i, a) in children.iter().enumerate() {
                for b in &children[i + 1..] {
                    if let (Some(ca), Some(cb)) = (a.local_cell(), b.local_cell()) {
                        if collision::cells_overlap(ca, a.footprint, cb, b.footprint) {
                            violations.push(InvariantViolation::Overlap {
                                a: a.id,
                                b: b.id,
                                step_id: step.id,
                            });
                        }
                    }
                }
            }
        }
        violations
    }
}
