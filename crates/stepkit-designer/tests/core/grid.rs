use stepkit_core::{Footprint, GridResolution, LayoutConfig, LocalCell, Point, Size};
use stepkit_designer::grid::{
    canvas_to_free_grid, clamp_local_cell, local_cell_to_pixel, pixel_to_local_cell,
    step_grid_resolution, StepFrame,
};

fn frame(x: f64, y: f64, w: f64, h: f64) -> StepFrame {
    StepFrame::new(Point::new(x, y), Size::new(w, h), &LayoutConfig::default())
}

#[test]
fn test_step_resolution_160() {
    assert_eq!(
        step_grid_resolution(Size::new(160.0, 160.0), 20.0),
        GridResolution::new(8, 8)
    );
}

#[test]
fn test_clamp_into_anchor_range() {
    let res = GridResolution::new(8, 8);
    assert_eq!(
        clamp_local_cell(7, 7, res, Footprint::ICON),
        Some(LocalCell::new(6, 6))
    );
    assert_eq!(
        clamp_local_cell(-3, 2, res, Footprint::ICON),
        Some(LocalCell::new(0, 2))
    );
    assert_eq!(clamp_local_cell(0, 0, GridResolution::new(1, 8), Footprint::ICON), None);
}

#[test]
fn test_snap_is_stable_on_grid_points() {
    let p = Point::new(120.0, 40.0);
    assert_eq!(canvas_to_free_grid(p, 10.0), p);
}

#[test]
fn test_expanded_cell_is_three_times_larger() {
    let f = frame(100.0, 150.0, 160.0, 160.0);
    assert_eq!(f.cell_size(false), (20.0, 20.0));
    assert_eq!(f.cell_size(true), (60.0, 60.0));
    assert_eq!(f.view_size(true), Size::new(480.0, 480.0));
}

#[test]
fn test_canvas_and_expanded_agree_on_cell() {
    let f = frame(100.0, 150.0, 160.0, 160.0);
    let cell = LocalCell::new(3, 5);
    let canvas = local_cell_to_pixel(cell, &f, false);
    let expanded = local_cell_to_pixel(cell, &f, true);
    assert_eq!(canvas, Point::new(160.0, 250.0));
    assert_eq!(expanded, Point::new(180.0, 300.0));
    assert_eq!(pixel_to_local_cell(canvas, &f, Footprint::ICON, false), Some(cell));
    assert_eq!(pixel_to_local_cell(expanded, &f, Footprint::ICON, true), Some(cell));
}

#[test]
fn test_far_pointer_clamps_to_last_anchor() {
    let f = frame(0.0, 0.0, 160.0, 100.0);
    assert_eq!(
        pixel_to_local_cell(Point::new(5000.0, 5000.0), &f, Footprint::ICON, false),
        Some(LocalCell::new(6, 3))
    );
}
