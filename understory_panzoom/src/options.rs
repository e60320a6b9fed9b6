// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.
//!
//! [`Options`] is a builder; every field has the default listed on its
//! setter. Values are validated when the engine is created.
//!
//! ```
//! use kurbo::Rect;
//! use understory_panzoom::{Bounds, Options};
//!
//! let options = Options::new()
//!     .min_zoom(0.5)
//!     .max_zoom(8.0)
//!     .bounds(Bounds::Rect(Rect::new(0.0, 0.0, 800.0, 600.0)))
//!     .before_wheel(|wheel| wheel.delta.y.abs() > 10.0);
//! assert_eq!(options.zoom_limits().unwrap().max(), 8.0);
//! ```

use alloc::boxed::Box;
use alloc::string::ToString;
use core::fmt;

use kurbo::{Point, Size};

use crate::bounds::{Bounds, DEFAULT_BOUNDS_PADDING, ZoomLimits};
use crate::error::ConfigurationError;
use crate::input::{EventInstructions, KeyInput, PointerInput, TouchInput, WheelInput};
use crate::kinetic::SmoothScroll;
use crate::transform::AspectMode;

/// Default wheel and keyboard zoom step.
pub const DEFAULT_ZOOM_SPEED: f64 = 0.065;

/// Default zoom multiplier for double click and double tap.
pub const DEFAULT_DOUBLE_CLICK_ZOOM: f64 = 1.75;

/// Fixed zoom focal point as fractions of the owner's size.
///
/// `{ x: 0.5, y: 0.5 }` zooms about the owner's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal fraction.
    pub x: f64,
    /// Vertical fraction.
    pub y: f64,
}

impl TransformOrigin {
    /// Creates an origin from fractions.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin at the owner's center.
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Owner-space point for an owner of `size`.
    #[must_use]
    pub fn resolve(&self, size: Size) -> Point {
        Point::new(size.width * self.x, size.height * self.y)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidTransformOrigin)
        }
    }
}

type InstructionHook<E> = Box<dyn FnMut(&E) -> EventInstructions>;
type KeyFilter = Box<dyn FnMut(&KeyInput, i8, i8, i8) -> bool>;
type ClickHook = Box<dyn FnMut(Point)>;

/// Host callbacks consulted during input dispatch.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) before_wheel: Option<InstructionHook<WheelInput>>,
    pub(crate) before_mouse_down: Option<InstructionHook<PointerInput>>,
    pub(crate) before_touch: Option<InstructionHook<TouchInput>>,
    pub(crate) before_key_down: Option<InstructionHook<KeyInput>>,
    pub(crate) before_double_click: Option<InstructionHook<PointerInput>>,
    pub(crate) filter_key: Option<KeyFilter>,
    pub(crate) on_click: Option<ClickHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_wheel", &self.before_wheel.is_some())
            .field("before_mouse_down", &self.before_mouse_down.is_some())
            .field("before_touch", &self.before_touch.is_some())
            .field("before_key_down", &self.before_key_down.is_some())
            .field("before_double_click", &self.before_double_click.is_some())
            .field("filter_key", &self.filter_key.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

fn boxed<E, F, R>(mut hook: F) -> InstructionHook<E>
where
    E: 'static,
    F: FnMut(&E) -> R + 'static,
    R: Into<EventInstructions>,
{
    Box::new(move |event| hook(event).into())
}

/// Pan/zoom engine configuration.
#[derive(Debug)]
pub struct Options {
    pub(crate) min_zoom: f64,
    pub(crate) max_zoom: f64,
    pub(crate) bounds: Bounds,
    pub(crate) bounds_padding: f64,
    pub(crate) zoom_speed: f64,
    pub(crate) pinch_speed: f64,
    pub(crate) zoom_double_click_speed: f64,
    pub(crate) real_pinch: bool,
    pub(crate) smooth_scroll: SmoothScroll,
    pub(crate) autocenter: bool,
    pub(crate) transform_origin: Option<TransformOrigin>,
    pub(crate) initial_x: Option<f64>,
    pub(crate) initial_y: Option<f64>,
    pub(crate) initial_zoom: Option<f64>,
    pub(crate) aspect: AspectMode,
    pub(crate) disable_keyboard_interaction: bool,
    pub(crate) hooks: Hooks,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_zoom: 0.0,
            max_zoom: f64::INFINITY,
            bounds: Bounds::Unbounded,
            bounds_padding: DEFAULT_BOUNDS_PADDING,
            zoom_speed: DEFAULT_ZOOM_SPEED,
            pinch_speed: 1.0,
            zoom_double_click_speed: DEFAULT_DOUBLE_CLICK_ZOOM,
            real_pinch: false,
            smooth_scroll: SmoothScroll::default(),
            autocenter: false,
            transform_origin: None,
            initial_x: None,
            initial_y: None,
            initial_zoom: None,
            aspect: AspectMode::Locked,
            disable_keyboard_interaction: false,
            hooks: Hooks::default(),
        }
    }
}

impl Options {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest permitted scale. Default `0`.
    #[must_use]
    pub fn min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self
    }

    /// Largest permitted scale. Default `+inf`.
    #[must_use]
    pub fn max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Translation constraint. Default [`Bounds::Unbounded`].
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Padding ratio for [`Bounds::Container`]. Default `0.05`.
    #[must_use]
    pub fn bounds_padding(mut self, padding: f64) -> Self {
        self.bounds_padding = padding;
        self
    }

    /// Wheel and keyboard zoom step. Default `0.065`.
    #[must_use]
    pub fn zoom_speed(mut self, speed: f64) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Pinch sensitivity multiplier. Default `1`.
    #[must_use]
    pub fn pinch_speed(mut self, speed: f64) -> Self {
        self.pinch_speed = speed;
        self
    }

    /// Zoom multiplier for double click and double tap. Default `1.75`.
    #[must_use]
    pub fn zoom_double_click_speed(mut self, speed: f64) -> Self {
        self.zoom_double_click_speed = speed;
        self
    }

    /// Track the finger spread continuously instead of stepping. Default off.
    #[must_use]
    pub fn real_pinch(mut self, real_pinch: bool) -> Self {
        self.real_pinch = real_pinch;
        self
    }

    /// Release momentum. Accepts a `bool` or a [`SmoothScroll`]. Default on.
    #[must_use]
    pub fn smooth_scroll(mut self, smooth_scroll: impl Into<SmoothScroll>) -> Self {
        self.smooth_scroll = smooth_scroll.into();
        self
    }

    /// Fit the content into view on creation. Default off.
    #[must_use]
    pub fn autocenter(mut self, autocenter: bool) -> Self {
        self.autocenter = autocenter;
        self
    }

    /// Fixed zoom focal point overriding pointer positions. Default none.
    #[must_use]
    pub fn transform_origin(mut self, origin: Option<TransformOrigin>) -> Self {
        self.transform_origin = origin;
        self
    }

    /// Starting horizontal translation.
    #[must_use]
    pub fn initial_x(mut self, x: f64) -> Self {
        self.initial_x = Some(x);
        self
    }

    /// Starting vertical translation.
    #[must_use]
    pub fn initial_y(mut self, y: f64) -> Self {
        self.initial_y = Some(y);
        self
    }

    /// Starting scale.
    #[must_use]
    pub fn initial_zoom(mut self, zoom: f64) -> Self {
        self.initial_zoom = Some(zoom);
        self
    }

    /// Uniform or per-axis scale. Default [`AspectMode::Locked`].
    #[must_use]
    pub fn aspect(mut self, aspect: AspectMode) -> Self {
        self.aspect = aspect;
        self
    }

    /// Ignore keyboard input and leave the owner unfocusable. Default off.
    #[must_use]
    pub fn disable_keyboard_interaction(mut self, disable: bool) -> Self {
        self.disable_keyboard_interaction = disable;
        self
    }

    /// Consulted before a wheel event is handled.
    #[must_use]
    pub fn before_wheel<F, R>(mut self, hook: F) -> Self
    where
        F: FnMut(&WheelInput) -> R + 'static,
        R: Into<EventInstructions>,
    {
        self.hooks.before_wheel = Some(boxed(hook));
        self
    }

    /// Consulted before a mouse press starts a drag.
    ///
    /// Without a hook, non-primary buttons are ignored and propagate.
    /// Non-primary buttons never start a drag, whatever the hook returns.
    #[must_use]
    pub fn before_mouse_down<F, R>(mut self, hook: F) -> Self
    where
        F: FnMut(&PointerInput) -> R + 'static,
        R: Into<EventInstructions>,
    {
        self.hooks.before_mouse_down = Some(boxed(hook));
        self
    }

    /// Consulted before a touch start is handled.
    #[must_use]
    pub fn before_touch<F, R>(mut self, hook: F) -> Self
    where
        F: FnMut(&TouchInput) -> R + 'static,
        R: Into<EventInstructions>,
    {
        self.hooks.before_touch = Some(boxed(hook));
        self
    }

    /// Consulted before a key press is handled.
    #[must_use]
    pub fn before_key_down<F, R>(mut self, hook: F) -> Self
    where
        F: FnMut(&KeyInput) -> R + 'static,
        R: Into<EventInstructions>,
    {
        self.hooks.before_key_down = Some(boxed(hook));
        self
    }

    /// Consulted before a double click zooms.
    #[must_use]
    pub fn before_double_click<F, R>(mut self, hook: F) -> Self
    where
        F: FnMut(&PointerInput) -> R + 'static,
        R: Into<EventInstructions>,
    {
        self.hooks.before_double_click = Some(boxed(hook));
        self
    }

    /// Veto for decoded key intents `(key, dx, dy, dz)`; `true` skips the key.
    #[must_use]
    pub fn filter_key<F>(mut self, filter: F) -> Self
    where
        F: FnMut(&KeyInput, i8, i8, i8) -> bool + 'static,
    {
        self.hooks.filter_key = Some(Box::new(filter));
        self
    }

    /// Called with the owner-space point of a click or tap that no double
    /// click superseded.
    #[must_use]
    pub fn on_click<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Point) + 'static,
    {
        self.hooks.on_click = Some(Box::new(hook));
        self
    }

    /// Validated zoom limits.
    pub fn zoom_limits(&self) -> Result<ZoomLimits, ConfigurationError> {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }

    /// Whether scale is applied unconditionally before clamping translation.
    #[must_use]
    pub fn hard_edge(&self) -> bool {
        self.bounds_padding == 1.0 && self.min_zoom == 1.0
    }

    /// Checks every value, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.zoom_limits()?;
        self.bounds.validate()?;
        if !self.bounds_padding.is_finite() {
            return Err(ConfigurationError::InvalidBoundsPadding);
        }
        validate_zoom_speed(self.zoom_speed)?;
        positive("pinchSpeed", self.pinch_speed)?;
        positive("zoomDoubleClickSpeed", self.zoom_double_click_speed)?;
        if let Some(origin) = &self.transform_origin {
            origin.validate()?;
        }
        finite("initialX", self.initial_x)?;
        finite("initialY", self.initial_y)?;
        if let Some(zoom) = self.initial_zoom {
            positive("initialZoom", zoom)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_zoom_speed(speed: f64) -> Result<(), ConfigurationError> {
    if speed.is_finite() && speed >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidZoomSpeed)
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidOption {
            name: name.to_string(),
        })
    }
}

fn finite(name: &str, value: Option<f64>) -> Result<(), ConfigurationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ConfigurationError::InvalidOption {
            name: name.to_string(),
        }),
        _ => Ok(()),
    }
}
