// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform model: translation plus uniform or per-axis scale.

use kurbo::{Affine, Point, Vec2};

use crate::error::{Error, Result};

/// Whether zooming keeps the content's aspect ratio.
///
/// Chosen once when the engine is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AspectMode {
    /// One scale factor shared by both axes.
    #[default]
    Locked,
    /// Independent horizontal and vertical scale factors.
    Unlocked,
}

/// Scale component of a [`Transform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// Uniform scale.
    Uniform(f64),
    /// Independent per-axis scale.
    PerAxis {
        /// Horizontal scale.
        x: f64,
        /// Vertical scale.
        y: f64,
    },
}

/// Translation and scale applied to the panned content.
///
/// Content point `p` maps to owner-space point
/// `(p.x * scale_x + x, p.y * scale_y + y)`. Both scale factors are always
/// strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal translation in owner units.
    pub x: f64,
    /// Vertical translation in owner units.
    pub y: f64,
    scale: Scale,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The uniform identity transform `{0, 0, 1}`.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: Scale::Uniform(1.0),
    };

    /// Identity transform for the given aspect mode.
    #[must_use]
    pub fn identity(aspect: AspectMode) -> Self {
        match aspect {
            AspectMode::Locked => Self::IDENTITY,
            AspectMode::Unlocked => Self {
                x: 0.0,
                y: 0.0,
                scale: Scale::PerAxis { x: 1.0, y: 1.0 },
            },
        }
    }

    /// Creates a uniform transform.
    ///
    /// Returns [`Error::InvalidArgument`] unless `scale` is finite and positive.
    pub fn uniform(x: f64, y: f64, scale: f64) -> Result<Self> {
        let mut t = Self::IDENTITY;
        t.set_translation(Vec2::new(x, y))?;
        t.set_scale(scale)?;
        Ok(t)
    }

    /// Creates a per-axis transform.
    ///
    /// Returns [`Error::InvalidArgument`] unless both scales are finite and
    /// positive.
    pub fn per_axis(x: f64, y: f64, scale_x: f64, scale_y: f64) -> Result<Self> {
        let mut t = Self::identity(AspectMode::Unlocked);
        t.set_translation(Vec2::new(x, y))?;
        t.set_scale_xy(scale_x, scale_y)?;
        Ok(t)
    }

    /// Aspect mode of this transform's scale.
    #[must_use]
    pub fn aspect(&self) -> AspectMode {
        match self.scale {
            Scale::Uniform(_) => AspectMode::Locked,
            Scale::PerAxis { .. } => AspectMode::Unlocked,
        }
    }

    /// The scale component.
    #[must_use]
    pub fn scale_component(&self) -> Scale {
        self.scale
    }

    /// Effective scale used for zoom limits and absolute zoom.
    ///
    /// For per-axis transforms this is the smaller of the two factors.
    #[must_use]
    pub fn scale(&self) -> f64 {
        match self.scale {
            Scale::Uniform(s) => s,
            Scale::PerAxis { x, y } => x.min(y),
        }
    }

    /// Horizontal scale factor.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        match self.scale {
            Scale::Uniform(s) => s,
            Scale::PerAxis { x, .. } => x,
        }
    }

    /// Vertical scale factor.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        match self.scale {
            Scale::Uniform(s) => s,
            Scale::PerAxis { y, .. } => y,
        }
    }

    /// Translation as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Sets the translation.
    pub fn set_translation(&mut self, t: Vec2) -> Result<()> {
        if !t.x.is_finite() || !t.y.is_finite() {
            return Err(Error::InvalidArgument {
                operation: "set_translation",
            });
        }
        self.x = t.x;
        self.y = t.y;
        Ok(())
    }

    /// Sets both axes to `scale`, keeping the aspect mode.
    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        self.set_scale_xy(scale, scale)
    }

    /// Sets the per-axis scale factors.
    ///
    /// Uniform transforms take the horizontal factor for both axes.
    pub fn set_scale_xy(&mut self, scale_x: f64, scale_y: f64) -> Result<()> {
        if !is_valid_scale(scale_x) || !is_valid_scale(scale_y) {
            return Err(Error::InvalidArgument {
                operation: "set_scale",
            });
        }
        self.scale = match self.scale {
            Scale::Uniform(_) => Scale::Uniform(scale_x),
            Scale::PerAxis { .. } => Scale::PerAxis {
                x: scale_x,
                y: scale_y,
            },
        };
        Ok(())
    }

    /// Multiplies the scale by `ratio`; uniform transforms use `ratio.x`.
    ///
    /// Ratios must already be positive and finite.
    pub(crate) fn multiply_scale(&mut self, ratio: Vec2) {
        debug_assert!(ratio.x > 0.0 && ratio.y > 0.0, "scale ratio must be positive");
        self.scale = match self.scale {
            Scale::Uniform(s) => Scale::Uniform(s * ratio.x),
            Scale::PerAxis { x, y } => Scale::PerAxis {
                x: x * ratio.x,
                y: y * ratio.y,
            },
        };
    }

    /// Clamps each scale factor into `[min, max]`.
    ///
    /// Absorbs rounding after a ratio was clamped to land on a limit.
    pub(crate) fn clamp_scale(&mut self, min: f64, max: f64) {
        self.scale = match self.scale {
            Scale::Uniform(s) => Scale::Uniform(s.clamp(min, max)),
            Scale::PerAxis { x, y } => Scale::PerAxis {
                x: x.clamp(min, max),
                y: y.clamp(min, max),
            },
        };
    }

    /// Maps a content-space point into owner space.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.scale_x() + self.x, p.y * self.scale_y() + self.y)
    }

    /// Maps an owner-space point back into content space.
    #[must_use]
    pub fn inverse_apply(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.x) / self.scale_x(),
            (p.y - self.y) / self.scale_y(),
        )
    }

    /// The equivalent affine matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::new([self.scale_x(), 0.0, 0.0, self.scale_y(), self.x, self.y])
    }
}

fn is_valid_scale(s: f64) -> bool {
    s.is_finite() && s > 0.0
}
