// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the programmatic `PanZoom` API: construction, moves, zooms,
//! fitting, settings, and the pause/dispose lifecycle.

use kurbo::{Point, Rect};
use understory_panzoom::{
    Bounds, ConfigurationError, Error, Options, PanZoom, PanZoomEvent, Transform, WheelInput,
};

mod common;

use common::{FRAME_MS, FakeSurface, assert_close, engine, settle};

#[test]
fn new_engine_starts_at_identity_and_paints_once() {
    let mut pz = engine(Options::new());
    assert_eq!(pz.transform(), Transform::IDENTITY);
    assert!(pz.needs_frame());
    pz.frame(0);
    assert_eq!(pz.surface().paints, [Transform::IDENTITY]);
    assert_eq!(pz.drain_events(), [PanZoomEvent::Transform]);
    assert!(!pz.needs_frame());
}

#[test]
fn initial_values_override_identity() {
    let pz = engine(Options::new().initial_x(10.0).initial_y(-4.0).initial_zoom(3.0));
    let t = pz.transform();
    assert_eq!((t.x, t.y, t.scale()), (10.0, -4.0, 3.0));
}

#[test]
fn invalid_configuration_fails_construction() {
    let surface = FakeSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    let err = PanZoom::new(surface, Options::new().zoom_speed(f64::NAN)).unwrap_err();
    assert_eq!(err, Error::Configuration(ConfigurationError::InvalidZoomSpeed));

    let surface = FakeSurface::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    let bad = Bounds::Rect(Rect::new(0.0, f64::NAN, 1.0, 1.0));
    let err = PanZoom::new(surface, Options::new().bounds(bad)).unwrap_err();
    assert_eq!(err, Error::Configuration(ConfigurationError::InvalidBounds));
}

#[test]
fn zoom_stays_within_limits() {
    let mut pz = engine(Options::new().min_zoom(0.5).max_zoom(2.0));
    let ratios = [1.7, 3.0, 0.1, 0.9, 25.0, 0.01, 1.01, 0.5];
    for (i, ratio) in ratios.into_iter().enumerate() {
        let p = i as f64 * 37.0;
        pz.zoom_to(p, 600.0 - p, ratio).unwrap();
        let scale = pz.transform().scale();
        assert!((0.5..=2.0).contains(&scale), "scale {scale} escaped limits");
    }

    pz.zoom_abs(0.0, 0.0, 1.0).unwrap();
    pz.zoom_to(0.0, 0.0, 10.0).unwrap();
    assert_close(pz.transform().scale(), 2.0);
    pz.drain_events();
    // Already at the limit: nothing happens.
    pz.zoom_to(0.0, 0.0, 10.0).unwrap();
    assert!(pz.drain_events().is_empty());
}

#[test]
fn extreme_ratios_keep_scale_representable() {
    let mut pz = engine(Options::new());
    pz.zoom_to(0.0, 0.0, 1e-200).unwrap();
    pz.zoom_to(0.0, 0.0, 1e-200).unwrap();
    let t = pz.transform();
    assert!(t.scale() > 0.0);
    let content = t.inverse_apply(Point::new(10.0, 10.0));
    assert!(content.x.is_finite() && content.y.is_finite());

    let mut pz = engine(Options::new());
    pz.zoom_to(10.0, 10.0, 1e200).unwrap();
    pz.zoom_to(10.0, 10.0, 1e200).unwrap();
    pz.zoom_to(10.0, 10.0, 0.5).unwrap();
    let t = pz.transform();
    assert!(t.scale().is_finite());
    assert!(t.x.is_finite() && t.y.is_finite());
    assert!((t.scale() / 5e199 - 1.0).abs() < 1e-12);
}

#[test]
fn zoom_keeps_point_under_focus_fixed() {
    let mut pz = engine(Options::new().initial_x(13.0).initial_y(-7.0).initial_zoom(1.3));
    let focus = Point::new(120.0, 80.0);
    let content = pz.transform().inverse_apply(focus);

    pz.zoom_to(focus.x, focus.y, 1.7).unwrap();
    let after = pz.transform().apply(content);
    assert_close(after.x, focus.x);
    assert_close(after.y, focus.y);
    assert_close(pz.transform().scale(), 1.3 * 1.7);
}

#[test]
fn moves_compose_without_bounds() {
    let mut split = engine(Options::new());
    split.move_by(12.5, -3.0, false).unwrap();
    split.move_by(-40.0, 9.25, false).unwrap();

    let mut joined = engine(Options::new());
    joined.move_by(12.5 - 40.0, -3.0 + 9.25, false).unwrap();

    assert_eq!(split.transform(), joined.transform());
}

#[test]
fn non_finite_arguments_are_rejected() {
    let mut pz = engine(Options::new());
    let err = pz.zoom_to(f64::NAN, 0.0, 2.0).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidArgument {
            operation: "zoom_to"
        }
    );
    assert!(pz.move_to(f64::INFINITY, 0.0).is_err());
    assert!(pz.zoom_abs(0.0, 0.0, f64::NAN).is_err());
    assert!(pz.show_rectangle(Rect::new(0.0, 0.0, f64::INFINITY, 1.0)).is_err());
    assert_eq!(pz.transform(), Transform::IDENTITY);
}

#[test]
fn move_to_respects_explicit_bounds() {
    let bounds = Bounds::Rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    let mut pz = engine(Options::new().bounds(bounds));
    pz.move_to(500.0, 0.0).unwrap();
    // The content's left edge may not pass the bounds' right edge.
    assert_eq!(pz.transform().x, 100.0);
}

#[test]
fn smooth_zoom_animates_and_reports_completion() {
    let mut pz = engine(Options::new());
    pz.frame(0);
    pz.drain_events();

    pz.smooth_zoom(400.0, 300.0, 2.0).unwrap();
    pz.frame(FRAME_MS);
    let midway = pz.transform().scale();
    assert!(midway > 1.0 && midway < 2.0);

    settle(&mut pz, 2 * FRAME_MS);
    assert_close(pz.transform().scale(), 2.0);
    let events = pz.drain_events();
    let ends = events.iter().filter(|e| **e == PanZoomEvent::ZoomEnd).count();
    assert_eq!(ends, 1);
    assert_eq!(events.last(), Some(&PanZoomEvent::Transform));
}

#[test]
fn new_zoom_cancels_smooth_zoom() {
    let mut pz = engine(Options::new());
    pz.smooth_zoom(0.0, 0.0, 4.0).unwrap();
    pz.frame(0);
    pz.zoom_abs(0.0, 0.0, 1.0).unwrap();
    pz.zoom_to(0.0, 0.0, 0.5).unwrap();
    settle(&mut pz, FRAME_MS);
    assert_close(pz.transform().scale(), 0.5);
    assert!(!pz.drain_events().contains(&PanZoomEvent::ZoomEnd));
}

#[test]
fn smooth_move_reaches_target() {
    let mut pz = engine(Options::new());
    pz.smooth_move_to(100.0, 50.0).unwrap();
    settle(&mut pz, 0);
    assert_close(pz.transform().x, 100.0);
    assert_close(pz.transform().y, 50.0);
}

#[test]
fn center_on_moves_element_center_to_owner_center() {
    let surface = FakeSurface::new(Rect::new(100.0, 100.0, 900.0, 700.0));
    let mut pz = PanZoom::new(surface, Options::new()).unwrap();
    // Element centered at client (200, 150), i.e. owner (100, 50).
    pz.center_on(Rect::new(190.0, 140.0, 210.0, 160.0)).unwrap();
    settle(&mut pz, 0);
    assert_close(pz.transform().x, 300.0);
    assert_close(pz.transform().y, 250.0);
}

#[test]
fn show_rectangle_fits_and_centers() {
    let mut pz = engine(Options::new());
    pz.show_rectangle(Rect::new(100.0, 100.0, 300.0, 200.0)).unwrap();
    let t = pz.transform();
    // 800x600 owner over a 200x100 rectangle: limited by width.
    assert_close(t.scale(), 4.0);
    assert_close(t.x, -200.0 * 4.0 + 400.0);
    assert_close(t.y, -150.0 * 4.0 + 300.0);
}

#[test]
fn fitted_and_initial_scales_respect_limits() {
    let mut pz = engine(Options::new().min_zoom(0.5).max_zoom(2.0));
    pz.show_rectangle(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    let t = pz.transform();
    assert_close(t.scale(), 2.0);
    // Still centered: the rectangle's center (5, 5) lands on (400, 300).
    assert_close(t.x, 400.0 - 5.0 * 2.0);
    assert_close(t.y, 300.0 - 5.0 * 2.0);

    let pz = engine(Options::new().max_zoom(1.5).autocenter(true));
    let t = pz.transform();
    assert_close(t.scale(), 1.5);
    assert_close(t.x, 400.0 - 200.0 * 1.5);
    assert_close(t.y, 300.0 - 150.0 * 1.5);

    let pz = engine(Options::new().max_zoom(2.0).initial_zoom(10.0));
    assert_eq!(pz.transform().scale(), 2.0);
}

#[test]
fn autocenter_fits_content_on_creation() {
    let pz = engine(Options::new().autocenter(true));
    let t = pz.transform();
    assert_close(t.scale(), 2.0);
    assert_close(t.x, 0.0);
    assert_close(t.y, 0.0);
}

#[test]
fn autocenter_skips_empty_content() {
    let mut surface = FakeSurface::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    surface.content = Rect::new(10.0, 10.0, 10.0, 50.0);
    let pz = PanZoom::new(surface, Options::new().autocenter(true)).unwrap();
    assert_eq!(pz.transform(), Transform::IDENTITY);
}

#[test]
fn settings_are_validated() {
    let mut pz = engine(Options::new().max_zoom(4.0));
    assert!(pz.set_min_zoom(5.0).is_err());
    pz.set_min_zoom(0.25).unwrap();
    assert_eq!(pz.min_zoom(), 0.25);
    assert!(pz.set_max_zoom(0.1).is_err());
    assert_eq!(pz.max_zoom(), 4.0);

    assert_eq!(
        pz.set_zoom_speed(-1.0),
        Err(Error::Configuration(ConfigurationError::InvalidZoomSpeed))
    );
    pz.set_zoom_speed(0.2).unwrap();
    assert_eq!(pz.zoom_speed(), 0.2);
}

#[test]
fn input_while_paused_changes_nothing() {
    let wheel = WheelInput::new(Point::new(100.0, 100.0), 1.0, 0);

    let mut reference = engine(Options::new());
    reference.handle_wheel(&wheel);

    let mut pz = engine(Options::new());
    pz.pause();
    assert!(pz.is_paused());
    pz.handle_wheel(&wheel);
    assert_eq!(pz.transform(), Transform::IDENTITY);

    pz.resume();
    assert!(!pz.is_paused());
    pz.handle_wheel(&wheel);
    assert_eq!(pz.transform(), reference.transform());
}

#[test]
fn dispose_halts_all_updates() {
    let mut pz = engine(Options::new());
    pz.frame(0);
    pz.smooth_zoom(0.0, 0.0, 2.0).unwrap();
    pz.dispose();
    assert!(pz.is_disposed());
    assert!(!pz.needs_frame());

    let before = pz.transform();
    pz.handle_wheel(&WheelInput::new(Point::new(10.0, 10.0), -3.0, 50));
    pz.frame(FRAME_MS);
    pz.frame(2 * FRAME_MS);
    assert_eq!(pz.transform(), before);
    assert_eq!(pz.surface().paints.len(), 1);

    // Resume cannot revive a disposed engine.
    pz.resume();
    pz.handle_wheel(&WheelInput::new(Point::new(10.0, 10.0), -3.0, 100));
    assert_eq!(pz.transform(), before);
}
