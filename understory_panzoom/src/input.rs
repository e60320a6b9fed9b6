// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-agnostic input records and hook instructions.
//!
//! Positions are client coordinates (the same space the host's element
//! rectangles are reported in). Times are host milliseconds from any
//! monotonic origin.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Mouse button that triggered a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Primary (usually left) button.
    #[default]
    Primary,
    /// Auxiliary (usually middle) button.
    Auxiliary,
    /// Secondary (usually right) button.
    Secondary,
    /// Any other button, by host index.
    Other(u16),
}

/// A mouse press, move, release, or double click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Pointer position in client coordinates.
    pub position: Point,
    /// Button that changed state.
    pub button: PointerButton,
    /// Event time in milliseconds.
    pub time: u64,
}

impl PointerInput {
    /// Primary-button event at `position`.
    #[must_use]
    pub fn new(position: impl Into<Point>, time: u64) -> Self {
        Self {
            position: position.into(),
            button: PointerButton::Primary,
            time,
        }
    }

    /// Returns this event with a different button.
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Touch points of one event; two inline slots cover pinch without allocating.
pub type TouchPoints = SmallVec<[Point; 2]>;

/// A touch start, move, end, or cancel.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchInput {
    /// Fingers still on the surface, in client coordinates.
    pub touches: TouchPoints,
    /// Fingers that changed in this event (for touch end: the lifted ones).
    pub changed: TouchPoints,
    /// Event time in milliseconds.
    pub time: u64,
}

impl TouchInput {
    /// Event whose active touches are `touches` and whose changed touches are
    /// the same points.
    #[must_use]
    pub fn new(touches: &[Point], time: u64) -> Self {
        Self {
            touches: touches.iter().copied().collect(),
            changed: touches.iter().copied().collect(),
            time,
        }
    }

    /// Touch end/cancel event: `remaining` fingers stay down, `lifted` left.
    #[must_use]
    pub fn ended(remaining: &[Point], lifted: &[Point], time: u64) -> Self {
        Self {
            touches: remaining.iter().copied().collect(),
            changed: lifted.iter().copied().collect(),
            time,
        }
    }

    /// Average position of the active touches.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        centroid(&self.touches)
    }
}

pub(crate) fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    let n = points.len() as f64;
    Some((sum / n).to_point())
}

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Pixels; 100 px count as one line.
    Pixel,
    /// Lines (wheel notches).
    #[default]
    Line,
    /// Pages; one page counts as three lines.
    Page,
}

/// Pixels per wheel line, matching the usual desktop notch size.
pub const PIXELS_PER_LINE: f64 = 100.0;

/// Lines per wheel page.
pub const LINES_PER_PAGE: f64 = 3.0;

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelInput {
    /// Pointer position in client coordinates.
    pub position: Point,
    /// Scroll delta; positive `y` scrolls down (zooms out).
    pub delta: Vec2,
    /// Unit of `delta`.
    pub mode: DeltaMode,
    /// Event time in milliseconds.
    pub time: u64,
}

impl WheelInput {
    /// Vertical wheel event measured in lines.
    #[must_use]
    pub fn new(position: impl Into<Point>, delta_y: f64, time: u64) -> Self {
        Self {
            position: position.into(),
            delta: Vec2::new(0.0, delta_y),
            mode: DeltaMode::Line,
            time,
        }
    }

    /// Returns this event with a different delta unit.
    #[must_use]
    pub fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Vertical delta converted to lines.
    #[must_use]
    pub fn lines(&self) -> f64 {
        match self.mode {
            DeltaMode::Pixel => self.delta.y / PIXELS_PER_LINE,
            DeltaMode::Line => self.delta.y,
            DeltaMode::Page => self.delta.y * LINES_PER_PAGE,
        }
    }
}

/// Keys the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// `+` on the main keyboard.
    Plus,
    /// `=`, which carries `+` on US layouts.
    Equal,
    /// `-` on the main keyboard.
    Minus,
    /// Numpad `+`.
    NumpadAdd,
    /// Numpad `-`.
    NumpadSubtract,
    /// Anything else, by host key code.
    Other(u32),
}

impl Key {
    /// Maps a legacy DOM `keyCode`.
    #[must_use]
    pub fn from_key_code(code: u32) -> Self {
        match code {
            38 => Self::ArrowUp,
            40 => Self::ArrowDown,
            37 => Self::ArrowLeft,
            39 => Self::ArrowRight,
            187 => Self::Equal,
            107 => Self::NumpadAdd,
            189 => Self::Minus,
            109 => Self::NumpadSubtract,
            other => Self::Other(other),
        }
    }

    /// Pan and zoom direction signs `(x, y, z)` for this key.
    ///
    /// Positive `z` zooms out.
    #[must_use]
    pub fn intent(self) -> (i8, i8, i8) {
        match self {
            Self::ArrowUp => (0, 1, 0),
            Self::ArrowDown => (0, -1, 0),
            Self::ArrowLeft => (1, 0, 0),
            Self::ArrowRight => (-1, 0, 0),
            Self::Minus | Self::NumpadSubtract => (0, 0, 1),
            Self::Plus | Self::Equal | Self::NumpadAdd => (0, 0, -1),
            Self::Other(_) => (0, 0, 0),
        }
    }
}

/// A key press.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyInput {
    /// The pressed key.
    pub key: Key,
    /// Event time in milliseconds.
    pub time: u64,
}

impl KeyInput {
    /// Key press at `time`.
    #[must_use]
    pub fn new(key: Key, time: u64) -> Self {
        Self { key, time }
    }
}

/// What a `before_*` hook wants done with an event.
///
/// Hooks may return a `bool` instead: `true` means "ignore and propagate".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventInstructions {
    /// Skip the engine's handling of this event.
    pub ignore: bool,
    /// Let the event keep its default action and propagation.
    ///
    /// `None` means "same as `ignore`".
    pub propagate: Option<bool>,
}

impl EventInstructions {
    /// Handle the event and consume it.
    pub const HANDLE: Self = Self {
        ignore: false,
        propagate: Some(false),
    };

    /// Explicit instructions.
    #[must_use]
    pub fn new(ignore: bool, propagate: bool) -> Self {
        Self {
            ignore,
            propagate: Some(propagate),
        }
    }

    /// Whether the event should propagate, with the default filled in.
    #[must_use]
    pub fn propagates(&self) -> bool {
        self.propagate.unwrap_or(self.ignore)
    }

    /// The host response these instructions imply.
    #[must_use]
    pub fn response(&self) -> EventResponse {
        if self.propagates() {
            EventResponse::PASS
        } else {
            EventResponse::CONSUME
        }
    }
}

impl From<bool> for EventInstructions {
    fn from(ignore: bool) -> Self {
        Self {
            ignore,
            propagate: Some(ignore),
        }
    }
}

/// What the host should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// Suppress the event's default action.
    pub prevent_default: bool,
    /// Stop the event from propagating further.
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Leave the event alone.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Prevent the default action and stop propagation.
    pub const CONSUME: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}
