use stepkit_core::{Footprint, LocalCell, ObjectId, Point};
use stepkit_designer::collision::{
    is_cell_region_free, is_point_in_step_bounds, probe_cell_region, resolve_step_push,
};
use stepkit_designer::ObjectStore;

#[test]
fn test_probe_reports_occupant() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let a = store.add_icon("📷", "Camera", Footprint::ICON);
    let b = store.add_icon("🗺️", "Map", Footprint::ICON);
    store.move_attached(a, step, LocalCell::new(2, 2)).unwrap();

    let probe = probe_cell_region(&store, step, Some(LocalCell::new(3, 3)), Footprint::ICON, Some(b));
    assert!(!probe.valid);
    assert_eq!(probe.blocked_by, Some(a));
    assert_eq!(
        probe.occupied_cells,
        vec![
            LocalCell::new(3, 3),
            LocalCell::new(4, 3),
            LocalCell::new(3, 4),
            LocalCell::new(4, 4)
        ]
    );

    // The icon never blocks itself
    assert!(is_cell_region_free(&store, step, LocalCell::new(3, 3), Footprint::ICON, Some(a)));
}

#[test]
fn test_probe_without_capacity() {
    let store = ObjectStore::default();
    let probe = probe_cell_region(&store, ObjectId(1), None, Footprint::ICON, None);
    assert!(!probe.valid);
    assert!(probe.occupied_cells.is_empty());
}

#[test]
fn test_point_in_step_bounds_is_inclusive() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let frame = store.step_frame(step).unwrap();
    assert!(is_point_in_step_bounds(Point::new(50.0, 150.0), &frame));
    assert!(is_point_in_step_bounds(Point::new(210.0, 310.0), &frame));
    assert!(!is_point_in_step_bounds(Point::new(210.1, 200.0), &frame));
}

#[test]
fn test_push_does_not_cascade() {
    let mut store = ObjectStore::default();
    let a = store.add_step(Footprint::new(4, 4));
    let b = store.add_step(Footprint::new(4, 4));
    let c = store.add_step(Footprint::new(4, 4));
    store.move_free(a, Point::new(0.0, 0.0)).unwrap();
    store.move_free(b, Point::new(200.0, 0.0)).unwrap();
    store.move_free(c, Point::new(400.0, 0.0)).unwrap();

    let moving = store.step_box(a).unwrap();
    let res = resolve_step_push(&moving, Point::new(100.0, 0.0), &store.step_boxes(), store.config());
    assert_eq!(res.displaced.len(), 1);
    assert_eq!(res.displaced[0].step_id, b);
    assert_eq!(res.displaced[0].to, Point::new(280.0, 0.0));
}
