use chaos_equations::view::{DEFAULT_SCALE, OFFSCREEN, PlotView};

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn origin_maps_to_window_center() {
    let view = PlotView::new(1600, 900);
    assert_eq!(view.to_screen(0.0, 0.0), [800.0, 450.0]);
}

#[test]
fn scale_uses_half_height() {
    let view = PlotView::new(1600, 900);
    // 0.25 * 450 pixels per unit.
    assert_eq!(view.to_screen(1.0, 0.0), [912.5, 450.0]);
    assert_eq!(view.to_screen(0.0, -2.0), [800.0, 225.0]);

    // Odd heights round the half-height down.
    let odd = PlotView::new(1600, 901);
    assert_eq!(odd.to_screen(1.0, 0.0)[0], 912.5);
}

#[test]
fn offset_shifts_plot() {
    let mut view = PlotView::new(1000, 1000);
    view.offset_x = 1.0;
    view.offset_y = -1.0;
    assert_eq!(view.to_screen(1.0, -1.0), [500.0, 500.0]);
}

#[test]
fn non_finite_points_map_to_sentinel() {
    let view = PlotView::new(1600, 900);
    assert_eq!(view.to_screen(f64::NAN, 0.0), OFFSCREEN);
    assert_eq!(view.to_screen(0.0, f64::INFINITY), OFFSCREEN);
    assert_eq!(view.to_screen(1e300, 0.0), OFFSCREEN);
    assert!(!view.contains(OFFSCREEN));
}

#[test]
fn contains_excludes_edges() {
    let view = PlotView::new(100, 50);
    assert!(view.contains([1.0, 1.0]));
    assert!(view.contains([99.5, 49.5]));
    assert!(!view.contains([0.0, 10.0]));
    assert!(!view.contains([10.0, 0.0]));
    assert!(!view.contains([100.0, 10.0]));
    assert!(!view.contains([10.0, 50.0]));
    assert!(!view.contains([-3.0, 10.0]));
}

#[test]
fn center_on_fits_bounding_box() {
    let mut view = PlotView::new(1600, 900);
    view.center_on(&[[-1.0, -1.0], [1.0, 3.0], [0.0, 0.0]]);
    assert!(close(view.offset_x, 0.0));
    assert!(close(view.offset_y, 1.0));
    assert!(close(view.scale, 1.0 / 2.4));
}

#[test]
fn center_on_clamps_outliers() {
    let mut view = PlotView::new(1600, 900);
    view.center_on(&[[-10.0, 0.0], [10.0, 2.0]]);
    assert!(close(view.offset_x, 0.0));
    assert!(close(view.offset_y, 1.0));
    assert!(close(view.scale, 1.0 / 4.8));
}

#[test]
fn center_on_single_point_caps_zoom() {
    let mut view = PlotView::new(1600, 900);
    view.center_on(&[[0.5, -0.5]]);
    assert!(close(view.offset_x, 0.5));
    assert!(close(view.offset_y, -0.5));
    assert!(close(view.scale, 10.0));
}

#[test]
fn reset_restores_defaults_and_keeps_size() {
    let mut view = PlotView::new(640, 480);
    view.center_on(&[[1.0, 1.0], [2.0, 3.0]]);
    view.reset();
    assert_eq!(view.scale, DEFAULT_SCALE);
    assert_eq!((view.offset_x, view.offset_y), (0.0, 0.0));
    assert_eq!((view.width, view.height), (640, 480));

    view.resize(800, 600);
    assert_eq!(view.to_screen(0.0, 0.0), [400.0, 300.0]);
}

#[test]
fn minimized_window_is_not_drawable() {
    let mut view = PlotView::new(1600, 900);
    assert!(view.is_drawable());
    view.resize(0, 0);
    assert!(!view.is_drawable());
    view.resize(1600, 0);
    assert!(!view.is_drawable());
    view.resize(1600, 900);
    assert!(view.is_drawable());
}
