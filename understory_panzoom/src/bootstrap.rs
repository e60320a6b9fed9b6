// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative configuration from `pz-*` attributes.
//!
//! A page may describe an engine with attributes on the tag that loads it:
//!
//! ```html
//! <script src="panzoom.min.js" query="#scene" pz-maxZoom="4" pz-bounds="true"></script>
//! ```
//!
//! [`parse_attributes`] turns such an attribute list into a [`Declaration`].
//! Finding the element and creating the engine is left to the host; nothing
//! here touches global state.

use alloc::string::{String, ToString};

use kurbo::Rect;
use serde_json::{Map, Value};

use crate::bounds::Bounds;
use crate::error::{ConfigurationError, Result};
use crate::kinetic::{KineticSettings, SmoothScroll};
use crate::options::{Options, TransformOrigin};

/// Attribute prefix marking an option.
pub const ATTRIBUTE_PREFIX: &str = "pz-";

/// Global name used when the tag carries no `name` attribute.
pub const DEFAULT_GLOBAL_NAME: &str = "pz";

/// Result of parsing a declarative tag.
#[derive(Debug)]
pub struct Declaration {
    /// Selector of the element to attach to, from the `query` attribute.
    pub query: Option<String>,
    /// Name to publish the engine under, from the `name` attribute.
    pub name: String,
    /// Options collected from `pz-*` attributes.
    pub options: Options,
}

/// Returns `true` when `src` names the panzoom script (`panzoom.js` or
/// `panzoom.min.js`, preceded by a word boundary).
#[must_use]
pub fn is_panzoom_script(src: &str) -> bool {
    const NAME: &str = "panzoom";
    src.match_indices(NAME).any(|(at, _)| {
        let boundary = src[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || c == '_'));
        let rest = &src[at + NAME.len()..];
        boundary && (rest.starts_with(".js") || rest.starts_with(".min.js"))
    })
}

/// Parses `(name, value)` attribute pairs.
///
/// `pz-*` values are JSON. Attributes without the prefix other than `query`
/// and `name` are ignored. Unknown options and malformed values fail with
/// [`ConfigurationError::InvalidOption`].
pub fn parse_attributes<'a, I>(attributes: I) -> Result<Declaration>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut declaration = Declaration {
        query: None,
        name: DEFAULT_GLOBAL_NAME.to_string(),
        options: Options::new(),
    };
    for (name, value) in attributes {
        match name.strip_prefix(ATTRIBUTE_PREFIX) {
            Some(option) => {
                let json: Value =
                    serde_json::from_str(value).map_err(|_| invalid(option))?;
                declaration.options = apply(declaration.options, option, &json)?;
            }
            None if name == "query" => declaration.query = Some(value.to_string()),
            None if name == "name" => declaration.name = value.to_string(),
            None => {}
        }
    }
    declaration.options.validate()?;
    log::debug!(
        "parsed declarative panzoom `{}` for {:?}",
        declaration.name,
        declaration.query
    );
    Ok(declaration)
}

fn invalid(name: &str) -> ConfigurationError {
    ConfigurationError::InvalidOption {
        name: name.to_string(),
    }
}

fn number(name: &str, value: &Value) -> Result<f64, ConfigurationError> {
    value.as_f64().ok_or_else(|| invalid(name))
}

fn flag(name: &str, value: &Value) -> Result<bool, ConfigurationError> {
    value.as_bool().ok_or_else(|| invalid(name))
}

fn field(name: &str, object: &Map<String, Value>, key: &str) -> Result<f64, ConfigurationError> {
    object.get(key).and_then(Value::as_f64).ok_or_else(|| invalid(name))
}

fn apply(options: Options, name: &str, value: &Value) -> Result<Options, ConfigurationError> {
    Ok(match name {
        "minZoom" => options.min_zoom(number(name, value)?),
        "maxZoom" => options.max_zoom(number(name, value)?),
        "boundsPadding" => options.bounds_padding(number(name, value)?),
        "zoomSpeed" => options.zoom_speed(number(name, value)?),
        "pinchSpeed" => options.pinch_speed(number(name, value)?),
        "zoomDoubleClickSpeed" => options.zoom_double_click_speed(number(name, value)?),
        "initialX" => options.initial_x(number(name, value)?),
        "initialY" => options.initial_y(number(name, value)?),
        "initialZoom" => options.initial_zoom(number(name, value)?),
        "realPinch" => options.real_pinch(flag(name, value)?),
        "autocenter" => options.autocenter(flag(name, value)?),
        "disableKeyboardInteraction" => options.disable_keyboard_interaction(flag(name, value)?),
        "bounds" => options.bounds(bounds(value)?),
        "smoothScroll" => options.smooth_scroll(smooth_scroll(name, value)?),
        "transformOrigin" => match value {
            Value::Null => options.transform_origin(None),
            Value::Object(o) => options.transform_origin(Some(TransformOrigin::new(
                field(name, o, "x")?,
                field(name, o, "y")?,
            ))),
            _ => return Err(invalid(name)),
        },
        _ => return Err(invalid(name)),
    })
}

fn bounds(value: &Value) -> Result<Bounds, ConfigurationError> {
    match value {
        Value::Bool(false) | Value::Null => Ok(Bounds::Unbounded),
        Value::Bool(true) => Ok(Bounds::Container),
        Value::Object(o) => {
            let side = |key: &str| {
                o.get(key)
                    .and_then(Value::as_f64)
                    .ok_or(ConfigurationError::InvalidBounds)
            };
            Ok(Bounds::Rect(Rect::new(
                side("left")?,
                side("top")?,
                side("right")?,
                side("bottom")?,
            )))
        }
        _ => Err(ConfigurationError::InvalidBounds),
    }
}

fn smooth_scroll(name: &str, value: &Value) -> Result<SmoothScroll, ConfigurationError> {
    match value {
        Value::Bool(enabled) => Ok(SmoothScroll::from(*enabled)),
        Value::Object(o) => {
            let mut settings = KineticSettings::default();
            for (key, v) in o {
                let n = v.as_f64().ok_or_else(|| invalid(name))?;
                match key.as_str() {
                    "minVelocity" => settings.min_velocity = n,
                    "amplitude" => settings.amplitude = n,
                    "timeConstant" => settings.time_constant_ms = n,
                    _ => return Err(invalid(name)),
                }
            }
            Ok(SmoothScroll::Enabled(settings))
        }
        _ => Err(invalid(name)),
    }
}
