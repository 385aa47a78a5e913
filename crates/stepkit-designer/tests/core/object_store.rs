use stepkit_core::{Footprint, LayoutError, LocalCell, ObjectId, Point, Size};
use stepkit_designer::model::{Attachment, FontWeight, PropertyUpdate};
use stepkit_designer::object_store::{InvariantViolation, NEW_ICON_POSITION, NEW_TEXT_POSITION};
use stepkit_designer::ObjectStore;

fn store_with_step() -> (ObjectStore, ObjectId) {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    store.move_free(step, Point::new(100.0, 150.0)).unwrap();
    (store, step)
}

#[test]
fn test_new_object_defaults() {
    let mut store = ObjectStore::default();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    let text = store.add_text();

    assert_eq!(store.get(icon).unwrap().position, NEW_ICON_POSITION);
    assert_eq!(store.get(text).unwrap().position, NEW_TEXT_POSITION);
    assert_eq!(store.len(), 2);
    let order: Vec<ObjectId> = store.iter().map(|o| o.id).collect();
    assert_eq!(order, vec![icon, text]);
}

#[test]
fn test_move_attached_clamps_then_commits() {
    let (mut store, step) = store_with_step();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);

    let cell = store.move_attached(icon, step, LocalCell::new(7, 7)).unwrap();
    assert_eq!(cell, LocalCell::new(6, 6));
    let obj = store.get(icon).unwrap();
    assert_eq!(obj.attachment, Some(Attachment { step_id: step, cell }));
    assert_eq!(obj.position, Point::new(220.0, 270.0));
}

#[test]
fn test_move_attached_refuses_overlap_and_leaves_store() {
    let (mut store, step) = store_with_step();
    let a = store.add_icon("📷", "Camera", Footprint::ICON);
    let b = store.add_icon("🗺️", "Map", Footprint::ICON);
    store.move_attached(a, step, LocalCell::new(0, 0)).unwrap();
    let before = store.snapshot();

    let err = store.move_attached(b, step, LocalCell::new(1, 1)).unwrap_err();
    assert_eq!(
        err,
        LayoutError::OverlapConflict {
            step_id: step,
            cell: LocalCell::new(1, 1),
            occupant: a,
        }
    );
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_move_attached_refuses_text_and_non_steps() {
    let (mut store, step) = store_with_step();
    let text = store.add_text();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);

    assert_eq!(
        store.move_attached(text, step, LocalCell::new(0, 0)),
        Err(LayoutError::NotAttachable { id: text })
    );
    assert_eq!(
        store.move_attached(icon, text, LocalCell::new(0, 0)),
        Err(LayoutError::InvalidTarget { id: text })
    );
}

#[test]
fn test_move_attached_capacity_exceeded() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(2, 2));
    store
        .update_property(step, PropertyUpdate::StepSize(Size::new(30.0, 80.0)))
        .unwrap();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    let err = store.move_attached(icon, step, LocalCell::new(0, 0)).unwrap_err();
    assert!(matches!(err, LayoutError::CapacityExceeded { .. }));
    assert!(store.get(icon).unwrap().attachment.is_none());
}

#[test]
fn test_moving_step_carries_children() {
    let (mut store, step) = store_with_step();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(2, 3)).unwrap();

    store.move_free(step, Point::new(300.0, 400.0)).unwrap();
    let obj = store.get(icon).unwrap();
    assert_eq!(obj.local_cell(), Some(LocalCell::new(2, 3)));
    assert_eq!(obj.position, Point::new(340.0, 460.0));
}

#[test]
fn test_move_free_detaches_icon() {
    let (mut store, step) = store_with_step();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(0, 0)).unwrap();
    store.move_free(icon, Point::new(10.0, 10.0)).unwrap();
    assert!(store.get(icon).unwrap().attachment.is_none());
    assert_eq!(store.attached_to(step).count(), 0);
}

#[test]
fn test_remove_step_detaches_children_in_place() {
    let (mut store, step) = store_with_step();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(1, 1)).unwrap();
    let position = store.get(icon).unwrap().position;

    store.remove(step).unwrap();
    let obj = store.get(icon).unwrap();
    assert!(obj.attachment.is_none());
    assert_eq!(obj.position, position);
    assert!(store.validate().is_empty());
}

#[test]
fn test_remove_unknown_is_refused() {
    let mut store = ObjectStore::default();
    assert_eq!(
        store.remove(ObjectId(42)).unwrap_err(),
        LayoutError::InvalidTarget { id: ObjectId(42) }
    );
}

#[test]
fn test_duplicate_attached_icon_lands_free() {
    let (mut store, step) = store_with_step();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(0, 0)).unwrap();

    let copy = store.duplicate(icon).unwrap();
    let obj = store.get(copy).unwrap();
    assert!(obj.attachment.is_none());
    assert_eq!(obj.position, Point::new(120.0, 170.0));
    assert_eq!(obj.name, "Camera copy");
}

#[test]
fn test_duplicate_step_is_clamped() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    store.move_free(step, Point::new(440.0, 640.0)).unwrap();
    let copy = store.duplicate(step).unwrap();
    assert_eq!(store.get(copy).unwrap().position, Point::new(440.0, 640.0));
}

#[test]
fn test_text_properties() {
    let mut store = ObjectStore::default();
    let text = store.add_text();
    store
        .update_property(text, PropertyUpdate::Text("Pack list".into()))
        .unwrap();
    store
        .update_property(text, PropertyUpdate::FontWeight(FontWeight::Bold))
        .unwrap();
    store
        .update_property(text, PropertyUpdate::Rotation(-15.0))
        .unwrap();

    let json = serde_json::to_value(store.get(text).unwrap()).unwrap();
    assert_eq!(json["kind"]["text"], "Pack list");
    assert_eq!(json["kind"]["font_weight"], "bold");
    assert_eq!(json["kind"]["rotation"], -15.0);

    assert!(matches!(
        store.update_property(text, PropertyUpdate::Glyph("x".into())),
        Err(LayoutError::PropertyMismatch { property: "glyph", .. })
    ));
}

#[test]
fn test_shrinking_step_refits_children() {
    let (mut store, step) = store_with_step();
    let a = store.add_icon("📷", "Camera", Footprint::ICON);
    let b = store.add_icon("🗺️", "Map", Footprint::ICON);
    store.move_attached(a, step, LocalCell::new(0, 0)).unwrap();
    store.move_attached(b, step, LocalCell::new(6, 6)).unwrap();

    // 8x8 -> 2x2 grid: `a` still fits at (0, 0); `b` would clamp onto it
    store
        .update_property(step, PropertyUpdate::StepSize(Size::new(40.0, 40.0)))
        .unwrap();
    assert_eq!(store.get(a).unwrap().local_cell(), Some(LocalCell::new(0, 0)));
    assert!(store.get(b).unwrap().attachment.is_none());
    assert!(store.validate().is_empty());
}

#[test]
fn test_growing_step_is_clamped_into_canvas() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    store.move_free(step, Point::new(400.0, 600.0)).unwrap();
    store
        .update_property(step, PropertyUpdate::StepSize(Size::new(300.0, 300.0)))
        .unwrap();
    assert_eq!(store.get(step).unwrap().position, Point::new(300.0, 500.0));
}

#[test]
fn test_load_snapshot_repairs_layout() {
    let (mut source, step) = store_with_step();
    let a = source.add_icon("📷", "Camera", Footprint::ICON);
    let b = source.add_icon("🗺️", "Map", Footprint::ICON);
    let orphan = source.add_icon("☕", "Coffee", Footprint::ICON);
    source.move_attached(a, step, LocalCell::new(0, 0)).unwrap();

    let mut objects = source.snapshot();
    for obj in objects.iter_mut() {
        if obj.id == b {
            obj.attachment = Some(Attachment {
                step_id: step,
                cell: LocalCell::new(1, 0),
            });
        }
        if obj.id == orphan {
            obj.attachment = Some(Attachment {
                step_id: ObjectId(999),
                cell: LocalCell::new(0, 0),
            });
        }
    }

    let mut store = ObjectStore::default();
    let repairs = store.load_snapshot(objects);
    assert_eq!(repairs, 2);
    assert!(store.get(a).unwrap().attachment.is_some());
    assert!(store.get(b).unwrap().attachment.is_none());
    assert!(store.get(orphan).unwrap().attachment.is_none());
    assert!(store.validate().is_empty());

    // Ids continue after the loaded ones
    let next = store.add_text();
    assert!(next > orphan);
}

#[test]
fn test_load_snapshot_earlier_sibling_keeps_cell() {
    let (mut source, step) = store_with_step();
    let a = source.add_icon("📷", "Camera", Footprint::ICON);
    let b = source.add_icon("🗺️", "Map", Footprint::ICON);
    source.move_attached(a, step, LocalCell::new(0, 0)).unwrap();
    source.move_attached(b, step, LocalCell::new(4, 4)).unwrap();

    // A hand-edited file drags `b` onto `a`
    let mut objects = source.snapshot();
    for obj in objects.iter_mut().filter(|obj| obj.id == b) {
        obj.attachment = Some(Attachment {
            step_id: step,
            cell: LocalCell::new(1, 0),
        });
    }

    let mut store = ObjectStore::default();
    assert_eq!(store.load_snapshot(objects), 1);
    assert_eq!(store.get(a).unwrap().local_cell(), Some(LocalCell::new(0, 0)));
    assert!(store.get(b).unwrap().attachment.is_none());
    assert!(store.validate().is_empty());
}

#[test]
fn test_load_snapshot_drops_max_id() {
    let mut source = ObjectStore::default();
    let keep = source.add_text();
    let last = source.add_text();
    let mut objects = source.snapshot();
    for obj in objects.iter_mut().filter(|obj| obj.id == last) {
        obj.id = ObjectId(u64::MAX);
    }

    let mut store = ObjectStore::default();
    assert_eq!(store.load_snapshot(objects), 1);
    assert_eq!(store.len(), 1);
    assert!(store.contains(keep));
    assert!(!store.contains(ObjectId(u64::MAX)));

    let next = store.add_text();
    assert!(next > keep);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_growing_step_pushes_neighbour() {
    let mut store = ObjectStore::default();
    let a = store.add_step(Footprint::new(4, 4));
    let b = store.add_step(Footprint::new(4, 4));
    store.move_free(a, Point::new(0.0, 0.0)).unwrap();
    store.move_free(b, Point::new(200.0, 0.0)).unwrap();

    store
        .update_property(a, PropertyUpdate::StepSize(Size::new(400.0, 160.0)))
        .unwrap();
    assert_eq!(store.get(a).unwrap().position, Point::new(0.0, 0.0));
    assert_eq!(store.get(b).unwrap().position, Point::new(420.0, 0.0));
}

#[test]
fn test_step_size_rederives_footprint() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(2, 2));
    store
        .update_property(step, PropertyUpdate::StepSize(Size::new(200.0, 120.0)))
        .unwrap();
    assert_eq!(store.get(step).unwrap().footprint, Footprint::new(5, 3));

    store
        .update_property(step, PropertyUpdate::StepSize(Size::new(10.0, 10.0)))
        .unwrap();
    assert_eq!(store.get(step).unwrap().footprint, Footprint::new(1, 1));
}

#[test]
fn test_validate_reports_stale_position() {
    let (mut source, step) = store_with_step();
    let icon = source.add_icon("📷", "Camera", Footprint::ICON);
    source.move_attached(icon, step, LocalCell::new(0, 0)).unwrap();
    let mut objects = source.snapshot();
    objects[1].position = Point::new(0.0, 0.0);

    // load_snapshot re-derives the cached position
    let mut store = ObjectStore::default();
    assert_eq!(store.load_snapshot(objects), 0);
    assert!(store.validate().is_empty());
    assert_eq!(store.get(icon).unwrap().position, Point::new(100.0, 150.0));
}

#[test]
fn test_invariant_violation_messages() {
    let v = InvariantViolation::DanglingAttachment {
        id: ObjectId(3),
        step_id: ObjectId(9),
    };
    assert_eq!(v.to_string(), "#3 is attached to missing step #9");
}
