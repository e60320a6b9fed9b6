// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::easing::Easing;

/// Frames per millisecond at the nominal 60 Hz refresh rate.
const FRAMES_PER_MS: f64 = 0.06;

/// Default tween duration in milliseconds.
pub const DEFAULT_DURATION_MS: u32 = 400;

/// Values that can be blended between two endpoints.
///
/// This plays the role of a "set of named numeric fields": every field is
/// interpolated with the same eased progress.
pub trait Interpolate: Copy {
    /// Returns the value `t` of the way from `self` to `to`.
    ///
    /// `t` is eased progress and may leave `[0, 1]` for overshooting curves.
    #[must_use]
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t)
    }
}

/// Duration and curve for a [`Tween`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenOptions {
    /// Nominal duration in milliseconds; converted to 60 Hz frames.
    pub duration_ms: u32,
    /// Curve applied to linear frame progress.
    pub easing: Easing,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl TweenOptions {
    /// Returns these options with a different duration.
    #[must_use]
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Returns these options with a different easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Result of advancing a [`Tween`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenStep<T> {
    /// An intermediate value; more frames follow.
    Running(T),
    /// The final value; the tween is complete.
    Finished(T),
}

impl<T: Copy> TweenStep<T> {
    /// The value produced by this step.
    #[must_use]
    pub fn value(&self) -> T {
        match *self {
            Self::Running(v) | Self::Finished(v) => v,
        }
    }

    /// Returns `true` for the final step.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// A frame-counted interpolation from one value to another.
///
/// The host advances the tween once per display frame with [`Tween::step`].
/// Progress is measured in frames rather than wall time, so a stalled host
/// resumes the animation where it left off instead of jumping.
///
/// ```
/// use understory_tween::{Easing, Tween, TweenOptions, TweenStep};
///
/// let options = TweenOptions::default()
///     .with_duration(50)
///     .with_easing(Easing::Linear);
/// let mut tween = Tween::new(0.0_f64, 3.0, options);
///
/// assert_eq!(tween.step(), Some(TweenStep::Running(1.0)));
/// assert_eq!(tween.step(), Some(TweenStep::Running(2.0)));
/// assert_eq!(tween.step(), Some(TweenStep::Finished(3.0)));
/// assert_eq!(tween.step(), None);
/// ```
#[derive(Clone, Debug)]
pub struct Tween<T> {
    from: T,
    to: T,
    easing: Easing,
    frame: u32,
    frames: f64,
    active: bool,
}

impl<T: Interpolate> Tween<T> {
    /// Creates a tween from `from` to `to`.
    #[must_use]
    pub fn new(from: T, to: T, options: TweenOptions) -> Self {
        let frames = (f64::from(options.duration_ms) * FRAMES_PER_MS).max(1.0);
        Self {
            from,
            to,
            easing: options.easing,
            frame: 0,
            frames,
            active: true,
        }
    }

    /// Advances one frame.
    ///
    /// Returns `None` once the tween has finished or was cancelled.
    pub fn step(&mut self) -> Option<TweenStep<T>> {
        if !self.active {
            return None;
        }
        self.frame = self.frame.saturating_add(1);
        let progress = (f64::from(self.frame) / self.frames).min(1.0);
        if progress >= 1.0 {
            self.active = false;
            return Some(TweenStep::Finished(self.to));
        }
        let t = self.easing.apply(progress);
        Some(TweenStep::Running(self.from.interpolate(self.to, t)))
    }

    /// Stops the tween without producing a final value.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Returns `true` while frames remain.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> T {
        self.from
    }

    /// Target value.
    #[must_use]
    pub fn to(&self) -> T {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::{Interpolate, Tween, TweenOptions, TweenStep};
    use crate::Easing;

    #[test]
    fn default_duration_is_twenty_four_frames() {
        let mut tween = Tween::new(0.0_f64, 1.0, TweenOptions::default());
        let mut frames = 0;
        while let Some(step) = tween.step() {
            frames += 1;
            if step.is_finished() {
                assert_eq!(step.value(), 1.0);
            }
        }
        assert_eq!(frames, 24);
    }

    #[test]
    fn zero_duration_finishes_on_first_frame() {
        let options = TweenOptions::default().with_duration(0);
        let mut tween = Tween::new(Vec2::ZERO, Vec2::new(10.0, -4.0), options);
        assert_eq!(
            tween.step(),
            Some(TweenStep::Finished(Vec2::new(10.0, -4.0)))
        );
        assert!(!tween.is_active());
    }

    #[test]
    fn cancel_suppresses_final_value() {
        let mut tween = Tween::new(0.0_f64, 1.0, TweenOptions::default());
        assert!(matches!(tween.step(), Some(TweenStep::Running(_))));
        tween.cancel();
        assert_eq!(tween.step(), None);
    }

    #[test]
    fn eased_values_stay_between_endpoints() {
        let options = TweenOptions::default().with_easing(Easing::EaseInOut);
        let mut tween = Tween::new(2.0_f64, 4.0, options);
        while let Some(step) = tween.step() {
            let v = step.value();
            assert!((2.0..=4.0).contains(&v));
        }
    }

    #[test]
    fn vectors_interpolate_per_field() {
        let v = Vec2::new(0.0, 10.0).interpolate(Vec2::new(10.0, 0.0), 0.25);
        assert_eq!(v, Vec2::new(2.5, 7.5));
    }
}
