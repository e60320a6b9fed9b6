// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_panzoom --heading-base-level=0

//! Understory Pan/Zoom: a headless gesture-to-transform engine.
//!
//! This crate turns raw pointer, touch, wheel and keyboard input into a
//! translate + scale transform for a piece of content. It covers:
//! - Mouse and single-finger drag, with kinetic scrolling after release.
//! - Wheel zoom, continuous or stepped pinch zoom, and keyboard pan/zoom.
//! - Click versus double click/double tap disambiguation by time.
//! - Zoom limits and bounds clamping that keep the zoom focal point fixed.
//! - Smooth, cancelable move and zoom animations.
//!
//! It does **not** own an event loop, timers, or a renderer. Callers are
//! expected to:
//! - Implement [`Surface`] (or wrap a DOM element in [`MatrixSurface`]).
//! - Forward native events to the `handle_*` methods with a millisecond
//!   timestamp and apply the returned [`EventResponse`].
//! - Call [`PanZoom::frame`] from their refresh callback while
//!   [`PanZoom::needs_frame`] is `true`, then drain [`PanZoomEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_panzoom::{Options, PanZoom, PanZoomEvent, Surface, Transform, WheelInput};
//!
//! struct Canvas {
//!     painted: Option<Transform>,
//! }
//!
//! impl Surface for Canvas {
//!     fn content_bounds(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 400.0, 300.0)
//!     }
//!     fn owner_rect(&self) -> Rect {
//!         Rect::new(0.0, 0.0, 800.0, 600.0)
//!     }
//!     fn apply_transform(&mut self, transform: &Transform) {
//!         self.painted = Some(*transform);
//!     }
//! }
//!
//! let mut panzoom = PanZoom::new(Canvas { painted: None }, Options::new()).unwrap();
//!
//! // One wheel line down zooms out about the pointer.
//! panzoom.handle_wheel(&WheelInput::new(Point::new(100.0, 100.0), 1.0, 0));
//! panzoom.frame(16);
//!
//! let t = panzoom.transform();
//! assert!((t.scale() - 0.935).abs() < 1e-9);
//! assert_eq!(panzoom.surface().painted, Some(t));
//! assert_eq!(
//!     panzoom.drain_events(),
//!     [PanZoomEvent::Zoom, PanZoomEvent::Transform]
//! );
//! ```
//!
//! Logging goes through the [`log`] facade; no logger is installed.
//!
//! This crate is `no_std` and uses `alloc`. The `bootstrap` feature adds
//! [`bootstrap::parse_attributes`] for declarative `pz-*` configuration.

#![no_std]

extern crate alloc;

#[cfg(feature = "bootstrap")]
pub mod bootstrap;
mod bounds;
mod controller;
mod error;
mod events;
mod gesture;
mod input;
mod kinetic;
mod options;
mod surface;
mod transform;

pub use bounds::{Bounds, Clamp, DEFAULT_BOUNDS_PADDING, ZoomLimits, client_rect, keep_inside};
pub use controller::PanZoom;
pub use error::{AdapterError, ConfigurationError, Error, Result};
pub use events::{MAX_QUEUED_EVENTS, PanZoomEvent};
pub use gesture::{CLICK_MAX_MS, CLICK_SLOP, DOUBLE_TAP_MS, KEYBOARD_MOVE_RATIO, MAX_WHEEL_STEP};
pub use input::{
    DeltaMode, EventInstructions, EventResponse, Key, KeyInput, LINES_PER_PAGE, PIXELS_PER_LINE,
    PointerButton, PointerInput, TouchInput, TouchPoints, WheelInput,
};
pub use kinetic::{Kinetic, KineticSettings, SmoothScroll};
pub use options::{DEFAULT_DOUBLE_CLICK_ZOOM, DEFAULT_ZOOM_SPEED, Options, TransformOrigin};
pub use surface::{
    ElementKind, HostElement, MatrixSurface, ScreenTransform, Surface, css_matrix, svg_matrix,
};
pub use transform::{AspectMode, Scale, Transform};
