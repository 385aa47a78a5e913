use stepkit_core::{Footprint, LocalCell, Point};
use stepkit_designer::placement::{
    begin_drag, cancel_drag, end_drag, update_drag, DragOutcome, DragState,
};
use stepkit_designer::ObjectStore;

#[test]
fn test_grab_offset_is_kept_for_whole_gesture() {
    let mut store = ObjectStore::default();
    let text = store.add_text();
    let mut state = DragState::Idle;

    // Grab 7px right and 3px below the corner at (50, 100)
    assert!(begin_drag(&mut store, &mut state, None, text, Point::new(57.0, 103.0)));
    update_drag(&mut store, &mut state, Point::new(107.0, 203.0));
    assert_eq!(store.get(text).unwrap().position, Point::new(100.0, 200.0));
    update_drag(&mut store, &mut state, Point::new(211.0, 98.0));
    assert_eq!(store.get(text).unwrap().position, Point::new(200.0, 100.0));
}

#[test]
fn test_icon_detaches_when_leaving_step() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(0, 0)).unwrap();
    let mut state = DragState::Idle;

    begin_drag(&mut store, &mut state, None, icon, Point::new(50.0, 150.0));
    let preview = update_drag(&mut store, &mut state, Point::new(400.0, 603.0));
    assert_eq!(preview, None);
    let outcome = end_drag(&mut store, &mut state);
    assert_eq!(
        outcome,
        DragOutcome::Released {
            object_id: icon,
            position: Point::new(400.0, 600.0),
            attachment: None,
        }
    );
}

#[test]
fn test_icon_over_full_cell_snaps_free_with_invalid_preview() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let a = store.add_icon("📷", "Camera", Footprint::ICON);
    let b = store.add_icon("🗺️", "Map", Footprint::ICON);
    store.move_attached(a, step, LocalCell::new(0, 0)).unwrap();
    let mut state = DragState::Idle;

    begin_drag(&mut store, &mut state, None, b, Point::new(100.0, 200.0));
    let preview = update_drag(&mut store, &mut state, Point::new(53.0, 152.0)).unwrap();
    assert!(!preview.valid);
    assert_eq!(preview.step_id, step);
    let obj = store.get(b).unwrap();
    assert!(obj.attachment.is_none());
    assert_eq!(obj.position, Point::new(50.0, 150.0));
}

#[test]
fn test_step_drag_moves_children_of_pushed_steps() {
    let mut store = ObjectStore::default();
    let a = store.add_step(Footprint::new(4, 4));
    let b = store.add_step(Footprint::new(4, 4));
    store.move_free(a, Point::new(100.0, 150.0)).unwrap();
    store.move_free(b, Point::new(350.0, 150.0)).unwrap();
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, b, LocalCell::new(1, 1)).unwrap();
    let mut state = DragState::Idle;

    begin_drag(&mut store, &mut state, None, a, Point::new(110.0, 160.0));
    update_drag(&mut store, &mut state, Point::new(310.0, 160.0));
    assert_eq!(store.get(b).unwrap().position, Point::new(440.0, 150.0));
    let obj = store.get(icon).unwrap();
    assert_eq!(obj.local_cell(), Some(LocalCell::new(1, 1)));
    assert_eq!(obj.position, Point::new(460.0, 170.0));
    assert!(store.validate().is_empty());
}

#[test]
fn test_expanded_drag_commits_valid_drop() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(0, 0)).unwrap();
    let mut state = DragState::Idle;

    // Expanded cells are 60px; grab the icon 10px inside its corner
    assert!(begin_drag(&mut store, &mut state, Some(step), icon, Point::new(10.0, 10.0)));
    let preview = update_drag(&mut store, &mut state, Point::new(190.0, 250.0)).unwrap();
    assert!(preview.valid);
    assert_eq!(preview.cell, Some(LocalCell::new(3, 4)));
    assert_eq!(preview.position, Point::new(180.0, 240.0));

    // Nothing is committed before release
    assert_eq!(store.get(icon).unwrap().local_cell(), Some(LocalCell::new(0, 0)));
    assert_eq!(
        end_drag(&mut store, &mut state),
        DragOutcome::Committed {
            object_id: icon,
            step_id: step,
            cell: LocalCell::new(3, 4),
        }
    );
    assert_eq!(store.get(icon).unwrap().local_cell(), Some(LocalCell::new(3, 4)));
}

#[test]
fn test_expanded_drag_rejects_foreign_objects() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let free_icon = store.add_icon("📷", "Camera", Footprint::ICON);
    let mut state = DragState::Idle;
    assert!(!begin_drag(&mut store, &mut state, Some(step), free_icon, Point::new(0.0, 0.0)));
    assert!(!begin_drag(&mut store, &mut state, Some(step), step, Point::new(0.0, 0.0)));
    assert!(state.is_idle());
}

#[test]
fn test_cancel_discards_expanded_preview() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(2, 2)).unwrap();
    let mut state = DragState::Idle;

    begin_drag(&mut store, &mut state, Some(step), icon, Point::new(130.0, 130.0));
    update_drag(&mut store, &mut state, Point::new(400.0, 10.0));
    assert!(state.preview().is_some());
    assert_eq!(cancel_drag(&mut state), DragOutcome::Cancelled { object_id: icon });
    assert!(state.is_idle());
    assert_eq!(store.get(icon).unwrap().local_cell(), Some(LocalCell::new(2, 2)));
}

#[test]
fn test_release_without_move_reverts_expanded_drag() {
    let mut store = ObjectStore::default();
    let step = store.add_step(Footprint::new(4, 4));
    let icon = store.add_icon("📷", "Camera", Footprint::ICON);
    store.move_attached(icon, step, LocalCell::new(2, 2)).unwrap();
    let mut state = DragState::Idle;

    begin_drag(&mut store, &mut state, Some(step), icon, Point::new(130.0, 130.0));
    assert_eq!(
        end_drag(&mut store, &mut state),
        DragOutcome::Reverted {
            object_id: icon,
            step_id: step,
            cell: LocalCell::new(2, 2),
        }
    );
}

#[test]
fn test_gesture_on_deleted_object_ends() {
    let mut store = ObjectStore::default();
    let text = store.add_text();
    let mut state = DragState::Idle;
    begin_drag(&mut store, &mut state, None, text, Point::new(50.0, 100.0));
    store.remove(text).unwrap();
    assert_eq!(update_drag(&mut store, &mut state, Point::new(0.0, 0.0)), None);
    assert!(state.is_idle());
}
