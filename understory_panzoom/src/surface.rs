// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the engine and whatever it paints.
//!
//! A [`Surface`] reports geometry and receives the transform once per dirty
//! frame. [`MatrixSurface`] is the stock adapter for SVG and HTML elements
//! behind a small [`HostElement`] trait, so it works with any DOM binding.

use alloc::format;
use alloc::string::String;

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::error::AdapterError;
use crate::options::Options;
use crate::transform::Transform;

/// Scale and offset of the owner relative to the viewport.
///
/// Maps a client point `p` to `p * scale - offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTransform {
    /// Per-axis scale.
    pub scale: Vec2,
    /// Offset subtracted after scaling.
    pub offset: Vec2,
}

impl ScreenTransform {
    /// The identity mapping.
    pub const IDENTITY: Self = Self {
        scale: Vec2::new(1.0, 1.0),
        offset: Vec2::ZERO,
    };

    /// Reads the scale and translation entries of an affine matrix.
    #[must_use]
    pub fn from_affine(matrix: Affine) -> Self {
        let [a, _, _, d, e, f] = matrix.as_coeffs();
        Self {
            scale: Vec2::new(a, d),
            offset: Vec2::new(e, f),
        }
    }

    /// Maps a point.
    #[must_use]
    pub fn map_point(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale.x - self.offset.x,
            p.y * self.scale.y - self.offset.y,
        )
    }

    /// Maps a displacement; the offset cancels out.
    #[must_use]
    pub fn map_vector(&self, v: Vec2) -> Vec2 {
        Vec2::new(v.x * self.scale.x, v.y * self.scale.y)
    }
}

/// Something the engine can pan and zoom.
pub trait Surface {
    /// Bounding box of the content in content-local units.
    fn content_bounds(&self) -> Rect;

    /// Client rectangle of the element that receives input.
    fn owner_rect(&self) -> Rect;

    /// Paints `transform`. Called at most once per frame.
    fn apply_transform(&mut self, transform: &Transform);

    /// Owner scale and offset, for surfaces nested in scaled coordinate
    /// systems.
    fn screen_transform(&self) -> Option<ScreenTransform> {
        None
    }

    /// Transform matching the element's current presentation, if any.
    fn initial_transform(&mut self) -> Option<Transform> {
        None
    }
}

/// Element families the stock adapter recognizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// An SVG element nested inside an `<svg>`.
    SvgChild,
    /// An outermost `<svg>` element.
    SvgRoot,
    /// An HTML element.
    Html,
    /// Anything else.
    Unsupported,
}

/// Minimal view of a DOM element needed by [`MatrixSurface`].
pub trait HostElement {
    /// Family of this element.
    fn kind(&self) -> ElementKind;

    /// Returns `true` when the element has an owner: the nearest `<svg>` for
    /// SVG content, the parent element for HTML.
    fn has_owner(&self) -> bool;

    /// SVG bounding box (`getBBox`).
    fn bbox(&self) -> Rect;

    /// HTML client size (`clientWidth`, `clientHeight`).
    fn client_size(&self) -> Size;

    /// Client rectangle of the owner.
    fn owner_client_rect(&self) -> Rect;

    /// Screen matrix of the element itself.
    fn screen_ctm(&self) -> Option<Affine>;

    /// Screen matrix of the owner.
    fn owner_screen_ctm(&self) -> Option<Affine>;

    /// Sets an attribute on the element.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Sets an inline style property on the element.
    fn set_style(&mut self, property: &str, value: &str);

    /// Sets an attribute on the owner.
    fn set_owner_attribute(&mut self, name: &str, value: &str);

    /// Removes an attribute from the owner.
    fn remove_owner_attribute(&mut self, name: &str);

    /// Scrolls the element to its top.
    fn scroll_to_top(&mut self) {}
}

/// SVG `transform` attribute value for `t`.
#[must_use]
pub fn svg_matrix(t: &Transform) -> String {
    format!(
        "matrix({} 0 0 {} {} {})",
        t.scale_x(),
        t.scale_y(),
        t.x,
        t.y
    )
}

/// CSS `transform` property value for `t`.
#[must_use]
pub fn css_matrix(t: &Transform) -> String {
    format!(
        "matrix({}, 0, 0, {}, {}, {})",
        t.scale_x(),
        t.scale_y(),
        t.x,
        t.y
    )
}

/// Stock surface that writes a matrix onto an SVG or HTML element.
#[derive(Debug)]
pub struct MatrixSurface<E> {
    element: E,
    svg: bool,
}

impl<E: HostElement> MatrixSurface<E> {
    /// Wraps `element`, preparing its owner for input.
    ///
    /// Fails for root `<svg>` elements, detached elements, and anything that
    /// is neither SVG nor HTML.
    pub fn attach(mut element: E, options: &Options) -> Result<Self, AdapterError> {
        let svg = match element.kind() {
            ElementKind::SvgChild => true,
            ElementKind::Html => false,
            ElementKind::SvgRoot => return Err(AdapterError::RootSvgElement),
            ElementKind::Unsupported => return Err(AdapterError::UnsupportedElement),
        };
        if !element.has_owner() {
            return Err(AdapterError::DetachedElement);
        }
        if !svg {
            element.scroll_to_top();
        }
        if !options.disable_keyboard_interaction {
            element.set_owner_attribute("tabindex", "0");
        }
        log::debug!(
            "attached matrix surface to {} element",
            if svg { "svg" } else { "html" }
        );
        Ok(Self { element, svg })
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Unwraps the element.
    #[must_use]
    pub fn into_element(self) -> E {
        self.element
    }
}

impl<E: HostElement> Surface for MatrixSurface<E> {
    fn content_bounds(&self) -> Rect {
        if self.svg {
            self.element.bbox()
        } else {
            Rect::from_origin_size(Point::ORIGIN, self.element.client_size())
        }
    }

    fn owner_rect(&self) -> Rect {
        self.element.owner_client_rect()
    }

    fn apply_transform(&mut self, transform: &Transform) {
        if self.svg {
            self.element
                .set_attribute("transform", &svg_matrix(transform));
        } else {
            self.element.set_style("transform-origin", "0 0 0");
            self.element.set_style("transform", &css_matrix(transform));
        }
    }

    fn screen_transform(&self) -> Option<ScreenTransform> {
        if !self.svg {
            return None;
        }
        self.element
            .owner_screen_ctm()
            .map(ScreenTransform::from_affine)
    }

    fn initial_transform(&mut self) -> Option<Transform> {
        if !self.svg {
            return None;
        }
        let [a, _, _, _, e, f] = self.element.screen_ctm()?.as_coeffs();
        self.element.remove_owner_attribute("viewBox");
        Transform::uniform(e, f, a).ok()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use kurbo::{Affine, Point, Rect, Size, Vec2};

    use super::{ElementKind, HostElement, MatrixSurface, ScreenTransform, Surface};
    use crate::error::AdapterError;
    use crate::options::Options;
    use crate::transform::Transform;

    #[derive(Debug)]
    struct FakeElement {
        kind: ElementKind,
        owner: bool,
        writes: Vec<(String, String)>,
        owner_attrs: Vec<(String, String)>,
        removed: Vec<String>,
    }

    impl FakeElement {
        fn new(kind: ElementKind) -> Self {
            Self {
                kind,
                owner: true,
                writes: Vec::new(),
                owner_attrs: Vec::new(),
                removed: Vec::new(),
            }
        }
    }

    impl HostElement for FakeElement {
        fn kind(&self) -> ElementKind {
            self.kind
        }
        fn has_owner(&self) -> bool {
            self.owner
        }
        fn bbox(&self) -> Rect {
            Rect::new(5.0, 5.0, 25.0, 45.0)
        }
        fn client_size(&self) -> Size {
            Size::new(300.0, 200.0)
        }
        fn owner_client_rect(&self) -> Rect {
            Rect::new(10.0, 10.0, 110.0, 110.0)
        }
        fn screen_ctm(&self) -> Option<Affine> {
            Some(Affine::new([2.0, 0.0, 0.0, 2.0, 30.0, 40.0]))
        }
        fn owner_screen_ctm(&self) -> Option<Affine> {
            Some(Affine::new([1.5, 0.0, 0.0, 1.5, 10.0, 10.0]))
        }
        fn set_attribute(&mut self, name: &str, value: &str) {
            self.writes.push((name.to_string(), value.to_string()));
        }
        fn set_style(&mut self, property: &str, value: &str) {
            self.writes.push((property.to_string(), value.to_string()));
        }
        fn set_owner_attribute(&mut self, name: &str, value: &str) {
            self.owner_attrs.push((name.to_string(), value.to_string()));
        }
        fn remove_owner_attribute(&mut self, name: &str) {
            self.removed.push(name.to_string());
        }
    }

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn incompatible_elements_are_rejected() {
        let options = Options::new();
        let err = MatrixSurface::attach(FakeElement::new(ElementKind::SvgRoot), &options);
        assert_eq!(err.unwrap_err(), AdapterError::RootSvgElement);
        let err = MatrixSurface::attach(FakeElement::new(ElementKind::Unsupported), &options);
        assert_eq!(err.unwrap_err(), AdapterError::UnsupportedElement);
        let mut detached = FakeElement::new(ElementKind::Html);
        detached.owner = false;
        let err = MatrixSurface::attach(detached, &options);
        assert_eq!(err.unwrap_err(), AdapterError::DetachedElement);
    }

    #[test]
    fn svg_surface_writes_transform_attribute() {
        let mut surface =
            MatrixSurface::attach(FakeElement::new(ElementKind::SvgChild), &Options::new())
                .unwrap();
        assert_eq!(surface.content_bounds(), Rect::new(5.0, 5.0, 25.0, 45.0));
        surface.apply_transform(&Transform::uniform(3.0, 4.5, 2.0).unwrap());
        assert_eq!(
            surface.element().writes,
            [pair("transform", "matrix(2 0 0 2 3 4.5)")]
        );
        assert_eq!(surface.element().owner_attrs, [pair("tabindex", "0")]);
    }

    #[test]
    fn svg_surface_seeds_from_screen_matrix() {
        let mut surface =
            MatrixSurface::attach(FakeElement::new(ElementKind::SvgChild), &Options::new())
                .unwrap();
        let t = surface.initial_transform().unwrap();
        assert_eq!((t.x, t.y, t.scale()), (30.0, 40.0, 2.0));
        assert_eq!(surface.element().removed, ["viewBox"]);
        let screen = surface.screen_transform().unwrap();
        assert_eq!(screen.scale, Vec2::new(1.5, 1.5));
    }

    #[test]
    fn html_surface_writes_css_matrix() {
        let options = Options::new().disable_keyboard_interaction(true);
        let mut surface =
            MatrixSurface::attach(FakeElement::new(ElementKind::Html), &options).unwrap();
        assert_eq!(surface.content_bounds(), Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(surface.screen_transform(), None);
        assert_eq!(surface.initial_transform(), None);
        surface.apply_transform(&Transform::per_axis(1.0, 2.0, 0.5, 0.25).unwrap());
        assert_eq!(
            surface.element().writes,
            [
                pair("transform-origin", "0 0 0"),
                pair("transform", "matrix(0.5, 0, 0, 0.25, 1, 2)"),
            ]
        );
        assert!(surface.element().owner_attrs.is_empty());
    }

    #[test]
    fn screen_transform_maps_points_and_vectors() {
        let screen = ScreenTransform {
            scale: Vec2::new(2.0, 3.0),
            offset: Vec2::new(1.0, 1.0),
        };
        assert_eq!(screen.map_point(Point::new(1.0, 1.0)), Point::new(1.0, 2.0));
        assert_eq!(screen.map_vector(Vec2::new(1.0, 1.0)), Vec2::new(2.0, 3.0));
    }
}
