// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture session state and the small geometry helpers behind pinch and
//! click detection.

use kurbo::{Point, Vec2};

use crate::transform::AspectMode;

/// Window within which a second tap or click counts as a double tap.
pub const DOUBLE_TAP_MS: u64 = 300;

/// Longest press that still counts as a click.
pub const CLICK_MAX_MS: u64 = 300;

/// Farthest a press may travel and still count as a click.
pub const CLICK_SLOP: f64 = 5.0;

/// Largest zoom step a single wheel event may produce.
pub const MAX_WHEEL_STEP: f64 = 0.25;

/// Keyboard pan distance as a fraction of the owner's smaller side.
pub const KEYBOARD_MOVE_RATIO: f64 = 0.05;

/// Finger spread below which an axis is treated as collapsed.
const MIN_AXIS_SPREAD: f64 = 1.0;

/// Zoom multiplier for `lines` wheel lines (or key presses) at `speed`.
///
/// Positive `lines` zoom out. The step is capped at [`MAX_WHEEL_STEP`] so
/// large trackpad deltas do not jump.
pub(crate) fn scale_multiplier(speed: f64, lines: f64) -> f64 {
    if lines == 0.0 || lines.is_nan() {
        return 1.0;
    }
    let step = (speed * lines.abs()).min(MAX_WHEEL_STEP);
    1.0 - lines.signum() * step
}

/// Distance between two fingers, overall and per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spread {
    pub(crate) length: f64,
    pub(crate) axes: Vec2,
}

impl Spread {
    pub(crate) fn measure(a: Point, b: Point) -> Self {
        let d = b - a;
        Self {
            length: libm::hypot(d.x, d.y),
            axes: Vec2::new(d.x.abs(), d.y.abs()),
        }
    }

    /// Continuous pinch ratio from `baseline` to `self`.
    pub(crate) fn ratio_from(&self, baseline: &Self, aspect: AspectMode, speed: f64) -> Vec2 {
        let adjust = |current: f64, base: f64| {
            if base < MIN_AXIS_SPREAD {
                1.0
            } else {
                1.0 + (current / base - 1.0) * speed
            }
        };
        match aspect {
            AspectMode::Locked => {
                let r = if baseline.length > 0.0 {
                    1.0 + (self.length / baseline.length - 1.0) * speed
                } else {
                    1.0
                };
                Vec2::new(r, r)
            }
            AspectMode::Unlocked => Vec2::new(
                adjust(self.axes.x, baseline.axes.x),
                adjust(self.axes.y, baseline.axes.y),
            ),
        }
    }

    /// Direction of a stepped pinch: `1` when the fingers closed (zoom out),
    /// `-1` when they opened, `0` otherwise.
    pub(crate) fn step_direction(&self, baseline: &Self) -> f64 {
        if self.length < baseline.length {
            1.0
        } else if self.length > baseline.length {
            -1.0
        } else {
            0.0
        }
    }
}

/// Where and when a press or touch began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Press {
    pub(crate) time: u64,
    pub(crate) position: Point,
}

impl Press {
    /// Whether releasing at `time`/`position` counts as a click.
    pub(crate) fn is_click(&self, time: u64, position: Point) -> bool {
        let held = time.saturating_sub(self.time);
        let d = position - self.position;
        held < CLICK_MAX_MS && libm::hypot(d.x, d.y) <= CLICK_SLOP
    }
}

/// A click waiting out the double-tap window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingClick {
    pub(crate) deadline: u64,
    pub(crate) point: Point,
}

/// State of the interaction in progress; reset whenever a gesture ends.
#[derive(Clone, Debug, Default)]
pub(crate) struct Session {
    /// A mouse drag owns the document-level move/up stream.
    pub(crate) mouse_captured: bool,
    /// A touch gesture owns the document-level touch stream.
    pub(crate) touch_in_progress: bool,
    /// Last pointer or touch centroid, owner-relative.
    pub(crate) last: Point,
    pub(crate) pan_started: bool,
    /// More than one finger took part in the current touch gesture.
    pub(crate) multitouch: bool,
    pub(crate) touch_count: usize,
    pub(crate) pinch: Option<Spread>,
    pub(crate) press: Option<Press>,
}

impl Session {
    /// Forgets the mouse drag.
    pub(crate) fn release_mouse(&mut self) {
        self.mouse_captured = false;
        self.pan_started = false;
        self.press = None;
    }

    /// Forgets the touch gesture.
    pub(crate) fn release_touches(&mut self) {
        self.touch_in_progress = false;
        self.pan_started = false;
        self.multitouch = false;
        self.touch_count = 0;
        self.pinch = None;
        self.press = None;
    }
}
