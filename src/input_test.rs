#![allow(clippy::float_cmp)]

use super::*;

fn vp(pan_x: f64, pan_y: f64, zoom: f64) -> Viewport {
    Viewport { pan_x, pan_y, zoom, width: 1200.0, height: 600.0 }
}

// =============================================================
// Keys
// =============================================================

#[test]
fn zoom_keys_map_to_commands() {
    assert_eq!(Key("+".into()).command(), Some(ViewCommand::ZoomIn));
    assert_eq!(Key("=".into()).command(), Some(ViewCommand::ZoomIn));
    assert_eq!(Key("-".into()).command(), Some(ViewCommand::ZoomOut));
    assert_eq!(Key("0".into()).command(), Some(ViewCommand::Reset));
}

#[test]
fn unbound_key_has_no_command() {
    assert_eq!(Key("Escape".into()).command(), None);
    assert_eq!(Key("a".into()).command(), None);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert!(!InputState::default().is_panning());
}

#[test]
fn begin_pan_records_anchor_relative_to_pan() {
    let state = InputState::begin_pan(Point::new(300.0, 200.0), &vp(100.0, 50.0, 1.0));
    assert_eq!(
        state,
        InputState::Panning { anchor: Point::new(200.0, 150.0), pressed_at: Point::new(300.0, 200.0) }
    );
    assert!(state.is_panning());
}

#[test]
fn pan_to_assigns_pan_from_anchor() {
    let v = vp(100.0, 50.0, 1.5);
    let state = InputState::begin_pan(Point::new(300.0, 200.0), &v);
    let moved = state.pan_to(Point::new(350.0, 180.0), &v).unwrap();
    assert_eq!(moved.pan_x, 150.0);
    assert_eq!(moved.pan_y, 30.0);
    assert_eq!(moved.zoom, 1.5);
}

#[test]
fn pan_to_does_not_accumulate() {
    let v = vp(0.0, 0.0, 1.0);
    let state = InputState::begin_pan(Point::new(10.0, 10.0), &v);
    let mut current = v;
    for x in [20.0, 35.0, 12.0, 90.0] {
        current = state.pan_to(Point::new(x, 10.0), &current).unwrap();
    }
    // Only the final pointer position matters.
    assert_eq!(current.pan_x, 80.0);
    assert_eq!(current.pan_y, 0.0);
}

#[test]
fn pan_to_while_idle_is_none() {
    assert!(InputState::Idle.pan_to(Point::new(1.0, 1.0), &vp(0.0, 0.0, 1.0)).is_none());
}

#[test]
fn release_near_press_point_is_click() {
    let state = InputState::begin_pan(Point::new(100.0, 100.0), &vp(0.0, 0.0, 1.0));
    assert!(state.is_click_release(Point::new(102.0, 101.0), 3.0));
    assert!(!state.is_click_release(Point::new(110.0, 100.0), 3.0));
    assert!(!InputState::Idle.is_click_release(Point::new(0.0, 0.0), 3.0));
}

#[test]
fn end_returns_to_idle() {
    let state = InputState::begin_pan(Point::new(0.0, 0.0), &vp(0.0, 0.0, 1.0));
    assert_eq!(state.end(), InputState::Idle);
}

// =============================================================
// Zoom
// =============================================================

#[test]
fn zoom_in_multiplies_by_step() {
    let v = zoom_step(&vp(10.0, 20.0, 1.0), ZoomDirection::In, &TimelineConfig::default());
    assert!((v.zoom - 1.2).abs() < 1e-12);
    assert_eq!(v.pan_x, 10.0);
    assert_eq!(v.pan_y, 20.0);
}

#[test]
fn zoom_out_divides_by_step() {
    let v = zoom_step(&vp(0.0, 0.0, 1.2), ZoomDirection::Out, &TimelineConfig::default());
    assert!((v.zoom - 1.0).abs() < 1e-12);
}

#[test]
fn repeated_zoom_in_never_exceeds_max() {
    let cfg = TimelineConfig::default();
    let mut v = vp(0.0, 0.0, 1.0);
    for _ in 0..50 {
        v = zoom_step(&v, ZoomDirection::In, &cfg);
        assert!(v.zoom <= 3.0);
    }
    assert_eq!(v.zoom, 3.0);
}

#[test]
fn repeated_zoom_out_never_goes_below_min() {
    let cfg = TimelineConfig::default();
    let mut v = vp(0.0, 0.0, 1.0);
    for _ in 0..50 {
        v = zoom_step(&v, ZoomDirection::Out, &cfg);
        assert!(v.zoom >= 0.3);
    }
    assert_eq!(v.zoom, 0.3);
}
