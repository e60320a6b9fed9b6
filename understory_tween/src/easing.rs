// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Timing curve mapping linear progress in `[0, 1]` to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Progress is used unchanged.
    Linear,
    /// CSS-style cubic Bézier timing function.
    CubicBezier(CubicBezier),
    /// The CSS `ease` curve, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    #[default]
    Ease,
    /// The CSS `ease-in` curve, `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// The CSS `ease-out` curve, `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// The CSS `ease-in-out` curve, `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
}

impl Easing {
    /// Maps `t` (clamped into `[0, 1]`) through this curve.
    #[must_use]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier(curve) => curve.apply(t),
            Self::Ease => CubicBezier::new(0.25, 0.1, 0.25, 1.0).apply(t),
            Self::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0).apply(t),
            Self::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0).apply(t),
            Self::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0).apply(t),
        }
    }
}

/// Cubic Bézier curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
///
/// The x control coordinates are expected to lie in `[0, 1]` so the curve is
/// a function of time; values outside that range are clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 32;

impl CubicBezier {
    /// Creates a curve from its two inner control points.
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Evaluates the eased progress for linear progress `x`.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        sample(self.solve_t(x), self.y1, self.y2)
    }

    fn solve_t(&self, x: f64) -> f64 {
        let x1 = self.x1.clamp(0.0, 1.0);
        let x2 = self.x2.clamp(0.0, 1.0);
        let mut t = x;
        for _ in 0..NEWTON_ITERATIONS {
            let err = sample(t, x1, x2) - x;
            if err.abs() < SUBDIVISION_PRECISION {
                return t;
            }
            let slope = slope(t, x1, x2);
            if slope.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            t -= err / slope;
        }

        // Newton did not converge; fall back to bisection.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        t = x;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            let value = sample(t, x1, x2);
            if (value - x).abs() < SUBDIVISION_PRECISION {
                break;
            }
            if x > value {
                lo = t;
            } else {
                hi = t;
            }
            t = lo + (hi - lo) * 0.5;
        }
        t
    }
}

// One-dimensional Bézier with endpoints 0 and 1, in Horner form.
fn sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    3.0 * a * t * t + 2.0 * b * t + c
}
