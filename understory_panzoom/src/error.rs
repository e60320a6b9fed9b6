// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised by the pan/zoom engine.

use alloc::string::String;
use core::fmt;

/// Convenience alias for results produced by this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Top-level error type.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Options or setter arguments are invalid. Fix the configuration; retrying
    /// the same call will fail again.
    Configuration(ConfigurationError),
    /// A transform operation received a non-finite number.
    InvalidArgument {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// No stock adapter can drive the given element.
    AdapterIncompatibility(AdapterError),
}

/// Specific configuration problems.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigurationError {
    /// An explicit bounds rectangle has a non-finite edge or is inverted.
    InvalidBounds,
    /// Zoom speed must be a finite, non-negative number.
    InvalidZoomSpeed,
    /// Zoom limits must be non-negative, not NaN, and `min <= max`.
    InvalidZoomLimits {
        /// Rejected lower limit.
        min: f64,
        /// Rejected upper limit.
        max: f64,
    },
    /// Bounds padding must be a finite number.
    InvalidBoundsPadding,
    /// Transform origin fractions must be finite.
    InvalidTransformOrigin,
    /// A declarative option could not be understood.
    InvalidOption {
        /// Option name without the `pz-` prefix.
        name: String,
    },
}

/// Reasons a stock surface adapter refuses an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterError {
    /// The element is neither SVG-like nor DOM-like.
    UnsupportedElement,
    /// The element has no parent container to receive input.
    DetachedElement,
    /// The element is an outermost `<svg>`; a child group must be used instead.
    RootSvgElement,
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<AdapterError> for Error {
    fn from(err: AdapterError) -> Self {
        Self::AdapterIncompatibility(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "invalid configuration: {err}"),
            Self::InvalidArgument { operation } => {
                write!(f, "{operation} requires finite numbers")
            }
            Self::AdapterIncompatibility(err) => {
                write!(f, "cannot create panzoom for this element: {err}")
            }
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds => f.write_str(
                "bounds can be unbounded, the container, or a finite {left, top, right, bottom} rectangle",
            ),
            Self::InvalidZoomSpeed => f.write_str("zoom speed must be a finite, non-negative number"),
            Self::InvalidZoomLimits { min, max } => {
                write!(f, "zoom limits [{min}, {max}] are not a valid range")
            }
            Self::InvalidBoundsPadding => f.write_str("bounds padding must be a finite number"),
            Self::InvalidTransformOrigin => {
                f.write_str("transform origin must have finite fractional coordinates")
            }
            Self::InvalidOption { name } => write!(f, "option `{name}` has an invalid value"),
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnsupportedElement => "element is neither an SVG nor an HTML element",
            Self::DetachedElement => "element is detached from the document",
            Self::RootSvgElement => {
                "cannot apply panzoom to the root <svg> element, use a child group instead"
            }
        })
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::AdapterIncompatibility(err) => Some(err),
            Self::InvalidArgument { .. } => None,
        }
    }
}

impl core::error::Error for ConfigurationError {}

impl core::error::Error for AdapterError {}

/// Returns `Ok(())` when every value is finite, else `InvalidArgument`.
pub(crate) fn ensure_finite(operation: &'static str, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::InvalidArgument { operation })
    }
}
