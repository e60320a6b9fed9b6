// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tween --heading-base-level=0

//! Understory Tween: frame-counted tweens and easing curves.
//!
//! This crate provides a tiny, headless animation driver:
//! - [`Easing`]: linear and CSS-style cubic Bézier timing curves.
//! - [`Interpolate`]: values that can be blended (`f64`, `kurbo::Point`,
//!   `kurbo::Vec2`).
//! - [`Tween`]: steps from a start value to a target value once per display
//!   frame, yielding [`TweenStep::Running`] values and a final
//!   [`TweenStep::Finished`].
//!
//! It does **not** own a clock or a frame loop. Callers advance tweens from
//! whatever refresh callback their host provides, and cancel a tween by
//! calling [`Tween::cancel`] or dropping it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_tween::{Tween, TweenOptions, TweenStep};
//!
//! let mut tween = Tween::new(Vec2::ZERO, Vec2::new(100.0, 0.0), TweenOptions::default());
//!
//! let mut last = Vec2::ZERO;
//! while let Some(step) = tween.step() {
//!     last = step.value();
//!     if let TweenStep::Finished(v) = step {
//!         assert_eq!(v, Vec2::new(100.0, 0.0));
//!     }
//! }
//! assert_eq!(last, Vec2::new(100.0, 0.0));
//! ```
//!
//! Durations are given in milliseconds and converted to 60 Hz frames, so the
//! default 400 ms tween takes 24 frames.
//!
//! This crate is `no_std`.

#![no_std]

mod easing;
mod tween;

pub use easing::{CubicBezier, Easing};
pub use tween::{DEFAULT_DURATION_MS, Interpolate, Tween, TweenOptions, TweenStep};
