// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom limits and translation clamping.
//!
//! Everything here is a pure function of the current transform, the proposed
//! change, the content bounding box, and the resolved bounds rectangle.

use kurbo::{Point, Rect, Size, Vec2};

use crate::error::ConfigurationError;
use crate::transform::{AspectMode, Transform};

/// Default fraction of the container kept as padding for [`Bounds::Container`].
pub const DEFAULT_BOUNDS_PADDING: f64 = 0.05;

/// Constraint on where the transformed content may travel.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Bounds {
    /// No translation clamping.
    #[default]
    Unbounded,
    /// Use the owner's rectangle shrunk by the configured padding ratio.
    Container,
    /// An explicit rectangle in owner coordinates.
    Rect(Rect),
}

impl Bounds {
    /// Checks that an explicit rectangle is finite and not inverted.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Self::Unbounded | Self::Container => Ok(()),
            Self::Rect(r) => {
                let finite = [r.x0, r.y0, r.x1, r.y1].iter().all(|v| v.is_finite());
                if finite && r.x0 <= r.x1 && r.y0 <= r.y1 {
                    Ok(())
                } else {
                    Err(ConfigurationError::InvalidBounds)
                }
            }
        }
    }

    /// Resolves to a concrete rectangle for an owner of `owner_size`.
    #[must_use]
    pub fn resolve(&self, owner_size: Size, padding: f64) -> Option<Rect> {
        match *self {
            Self::Unbounded => None,
            Self::Container => Some(Rect::new(
                owner_size.width * padding,
                owner_size.height * padding,
                owner_size.width * (1.0 - padding),
                owner_size.height * (1.0 - padding),
            )),
            Self::Rect(r) => Some(r),
        }
    }
}

/// Closed interval of permitted scale values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

impl ZoomLimits {
    /// Creates limits; `min` must be non-negative and not above `max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigurationError> {
        if min.is_nan() || max.is_nan() || min < 0.0 || max <= 0.0 || min > max {
            return Err(ConfigurationError::InvalidZoomLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower limit.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper limit.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Adjusts `ratio` so that `current * ratio` stays within the limits.
    ///
    /// Returns `None` when `current` already sits on the limit the ratio
    /// pushes against, so the zoom is a no-op.
    #[must_use]
    pub fn clamp_ratio(&self, current: f64, ratio: f64) -> Option<f64> {
        let proposed = current * ratio;
        if proposed < self.min {
            if current == self.min {
                return None;
            }
            return Some(self.min / current);
        }
        if proposed > self.max {
            if current == self.max {
                return None;
            }
            return Some(self.max / current);
        }
        Some(ratio)
    }

    /// Clamps an absolute scale into the limits.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

/// Inputs to the clamp functions for a single update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clamp {
    /// Zoom limits to honor.
    pub limits: ZoomLimits,
    /// Content bounding box in content-local units.
    pub content: Rect,
    /// Resolved bounds rectangle, if translation is constrained.
    pub bounds: Option<Rect>,
    /// Apply scale unconditionally and clamp translation afterwards.
    ///
    /// Enabled when the bounds padding and the minimum zoom are both `1`.
    pub hard_edge: bool,
}

impl Clamp {
    /// Returns `transform` translated to `translation`, then kept inside bounds.
    #[must_use]
    pub fn pan(&self, transform: &Transform, translation: Vec2) -> Transform {
        let mut next = *transform;
        next.x = translation.x;
        next.y = translation.y;
        if let Some(bounds) = self.bounds {
            keep_inside(&mut next, self.content, bounds);
        }
        next
    }

    /// Zooms `transform` by `ratio` about the owner-space `focal` point.
    ///
    /// Uniform transforms only read `ratio.x`. Returns `None` when the limits
    /// leave nothing to do, or when the result would underflow to a zero
    /// scale or overflow to a non-finite one.
    #[must_use]
    pub fn zoom(&self, transform: &Transform, focal: Point, ratio: Vec2) -> Option<Transform> {
        let rx = self.limits.clamp_ratio(transform.scale_x(), ratio.x);
        let ry = self.limits.clamp_ratio(transform.scale_y(), ratio.y);
        let ratio = match (transform.aspect(), rx, ry) {
            (AspectMode::Locked, Some(r), _) => Vec2::new(r, r),
            (AspectMode::Locked, None, _) | (_, None, None) => return None,
            (AspectMode::Unlocked, rx, ry) => {
                Vec2::new(rx.unwrap_or(1.0), ry.unwrap_or(1.0))
            }
        };

        let mut next = *transform;
        next.x = focal.x - ratio.x * (focal.x - transform.x);
        next.y = focal.y - ratio.y * (focal.y - transform.y);

        let limits = self.limits;
        let rescale = |t: &mut Transform| {
            t.multiply_scale(ratio);
            t.clamp_scale(limits.min(), limits.max());
        };
        match self.bounds {
            None => rescale(&mut next),
            Some(bounds) if self.hard_edge => {
                rescale(&mut next);
                keep_inside(&mut next, self.content, bounds);
            }
            Some(bounds) => {
                // Translation is clamped against the old scale; a clamp
                // suppresses the scale change for this update.
                if !keep_inside(&mut next, self.content, bounds) {
                    rescale(&mut next);
                }
            }
        }
        is_representable(&next).then_some(next)
    }
}

fn is_representable(t: &Transform) -> bool {
    let positive = |s: f64| s.is_finite() && s > 0.0;
    positive(t.scale_x()) && positive(t.scale_y()) && t.x.is_finite() && t.y.is_finite()
}

/// Content rectangle in owner space under `transform`.
#[must_use]
pub fn client_rect(transform: &Transform, content: Rect) -> Rect {
    let left = content.x0 * transform.scale_x() + transform.x;
    let top = content.y0 * transform.scale_y() + transform.y;
    Rect::new(
        left,
        top,
        content.width() * transform.scale_x() + left,
        content.height() * transform.scale_y() + top,
    )
}

/// Shifts `transform` so the content does not leave `bounds`.
///
/// Each of the four sides is corrected independently and the corrections
/// add up; opposite sides are not reconciled. Returns `true` if any
/// correction was applied.
pub fn keep_inside(transform: &mut Transform, content: Rect, bounds: Rect) -> bool {
    let client = client_rect(transform, content);
    let mut adjusted = false;

    let diff = bounds.x0 - client.x1;
    if diff > 0.0 {
        transform.x += diff;
        adjusted = true;
    }
    let diff = bounds.x1 - client.x0;
    if diff < 0.0 {
        transform.x += diff;
        adjusted = true;
    }

    let diff = bounds.y0 - client.y1;
    if diff > 0.0 {
        transform.y += diff;
        adjusted = true;
    }
    let diff = bounds.y1 - client.y0;
    if diff < 0.0 {
        transform.y += diff;
        adjusted = true;
    }
    adjusted
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::{Bounds, Clamp, ZoomLimits, client_rect, keep_inside};
    use crate::transform::{AspectMode, Transform};

    fn clamp(bounds: Option<Rect>) -> Clamp {
        Clamp {
            limits: ZoomLimits::new(0.5, 4.0).unwrap(),
            content: Rect::new(0.0, 0.0, 100.0, 100.0),
            bounds,
            hard_edge: false,
        }
    }

    #[test]
    fn explicit_bounds_are_validated() {
        assert!(Bounds::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)).validate().is_ok());
        assert!(Bounds::Rect(Rect::new(10.0, 0.0, 0.0, 10.0)).validate().is_err());
        assert!(
            Bounds::Rect(Rect::new(0.0, f64::NAN, 10.0, 10.0))
                .validate()
                .is_err()
        );
        assert!(Bounds::Container.validate().is_ok());
    }

    #[test]
    fn container_bounds_apply_padding() {
        let r = Bounds::Container.resolve(Size::new(200.0, 100.0), 0.05);
        assert_eq!(r, Some(Rect::new(10.0, 5.0, 190.0, 95.0)));
        assert_eq!(Bounds::Unbounded.resolve(Size::new(1.0, 1.0), 0.05), None);
    }

    #[test]
    fn zoom_limits_reject_inverted_range() {
        assert!(ZoomLimits::new(2.0, 1.0).is_err());
        assert!(ZoomLimits::new(-1.0, 1.0).is_err());
        assert!(ZoomLimits::new(f64::NAN, 1.0).is_err());
        assert!(ZoomLimits::new(0.0, f64::INFINITY).is_ok());
    }

    #[test]
    fn ratio_is_clamped_to_limits() {
        let limits = ZoomLimits::new(0.5, 4.0).unwrap();
        assert_eq!(limits.clamp_ratio(1.0, 2.0), Some(2.0));
        assert_eq!(limits.clamp_ratio(2.0, 4.0), Some(2.0));
        assert_eq!(limits.clamp_ratio(1.0, 0.1), Some(0.5));
        assert_eq!(limits.clamp_ratio(4.0, 1.5), None);
        assert_eq!(limits.clamp_ratio(0.5, 0.5), None);
    }

    #[test]
    fn zoom_refuses_degenerate_results() {
        let c = Clamp {
            limits: ZoomLimits::default(),
            ..clamp(None)
        };
        let focal = Point::new(10.0, 10.0);

        let tiny = Transform::uniform(0.0, 0.0, 1e-200).unwrap();
        assert_eq!(c.zoom(&tiny, focal, Vec2::new(1e-200, 1e-200)), None);

        let huge = Transform::uniform(0.0, 0.0, 1e200).unwrap();
        assert_eq!(c.zoom(&huge, focal, Vec2::new(1e200, 1e200)), None);

        let far = Transform::uniform(-1e300, 0.0, 1.0).unwrap();
        assert_eq!(c.zoom(&far, focal, Vec2::new(1e10, 1e10)), None);
        assert!(c.zoom(&far, focal, Vec2::new(2.0, 2.0)).is_some());
    }

    #[test]
    fn zoom_keeps_focal_point_fixed() {
        let c = clamp(None);
        let t = Transform::uniform(13.0, -7.0, 1.5).unwrap();
        let focal = Point::new(40.0, 25.0);
        let content_before = t.inverse_apply(focal);
        let next = c.zoom(&t, focal, Vec2::new(1.8, 1.8)).unwrap();
        let content_after = next.inverse_apply(focal);
        assert!((content_before.x - content_after.x).abs() < 1e-9);
        assert!((content_before.y - content_after.y).abs() < 1e-9);
        assert!((next.scale() - 2.7).abs() < 1e-12);
    }

    #[test]
    fn zoom_at_limit_is_noop() {
        let c = clamp(None);
        let t = Transform::uniform(0.0, 0.0, 4.0).unwrap();
        assert_eq!(c.zoom(&t, Point::ORIGIN, Vec2::new(2.0, 2.0)), None);
    }

    #[test]
    fn keep_inside_pulls_content_back_from_each_side() {
        let bounds = Rect::new(10.0, 10.0, 90.0, 90.0);
        let content = Rect::new(0.0, 0.0, 50.0, 50.0);

        let mut t = Transform::uniform(-100.0, 0.0, 1.0).unwrap();
        assert!(keep_inside(&mut t, content, bounds));
        // Right edge of the content lands on the left edge of the bounds.
        assert_eq!(client_rect(&t, content).x1, 10.0);

        let mut t = Transform::uniform(0.0, 200.0, 1.0).unwrap();
        assert!(keep_inside(&mut t, content, bounds));
        assert_eq!(client_rect(&t, content).y0, 90.0);

        let mut t = Transform::uniform(20.0, 20.0, 1.0).unwrap();
        assert!(!keep_inside(&mut t, content, bounds));
    }

    #[test]
    fn opposite_side_corrections_are_not_reconciled() {
        // Content wider than the bounds on both sides only ever triggers the
        // side it crossed; the other side is left overflowing.
        let bounds = Rect::new(40.0, 0.0, 60.0, 100.0);
        let content = Rect::new(0.0, 0.0, 100.0, 10.0);
        let mut t = Transform::uniform(-95.0, 50.0, 1.0).unwrap();
        assert!(keep_inside(&mut t, content, bounds));
        let r = client_rect(&t, content);
        assert_eq!(r.x1, 40.0);
        assert!(r.x0 < bounds.x0);
    }

    #[test]
    fn clamped_zoom_suppresses_scale_change() {
        let c = clamp(Some(Rect::new(10.0, 10.0, 90.0, 90.0)));
        let t = Transform::uniform(85.0, 85.0, 1.0).unwrap();
        // Zooming out about the origin drags the content towards the bounds'
        // far corner; the clamp kicks in and the scale stays put.
        let next = c.zoom(&t, Point::new(500.0, 500.0), Vec2::new(0.5, 0.5)).unwrap();
        assert_eq!(next.scale(), 1.0);
    }

    #[test]
    fn hard_edge_applies_scale_then_clamps() {
        let mut c = clamp(Some(Rect::new(10.0, 10.0, 90.0, 90.0)));
        c.hard_edge = true;
        let t = Transform::uniform(85.0, 85.0, 1.0).unwrap();
        let next = c.zoom(&t, Point::new(500.0, 500.0), Vec2::new(0.5, 0.5)).unwrap();
        assert_eq!(next.scale(), 0.5);
        let r = client_rect(&next, c.content);
        assert!(r.x0 <= 90.0);
        assert!(r.y0 <= 90.0);
    }

    #[test]
    fn per_axis_zoom_clamps_each_axis() {
        let c = clamp(None);
        let t = Transform::identity(AspectMode::Unlocked);
        let next = c.zoom(&t, Point::ORIGIN, Vec2::new(8.0, 0.25)).unwrap();
        assert_eq!(next.scale_x(), 4.0);
        assert_eq!(next.scale_y(), 0.5);
    }

    #[test]
    fn pan_without_bounds_is_exact() {
        let c = clamp(None);
        let t = Transform::IDENTITY;
        let next = c.pan(&t, Vec2::new(-1234.5, 99.0));
        assert_eq!(next.translation(), Vec2::new(-1234.5, 99.0));
    }
}
