// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pan/zoom engine.
//!
//! [`PanZoom`] owns the transform and the gesture session. Hosts forward
//! native input to the `handle_*` methods, apply the returned
//! [`EventResponse`] to the native event, and call [`PanZoom::frame`] once
//! per display refresh while [`PanZoom::needs_frame`] is `true`.
//!
//! Positions passed to `handle_*` are client coordinates. Positions passed
//! to the programmatic zoom operations are relative to the owner's top-left
//! corner.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use understory_tween::{Tween, TweenOptions, TweenStep};

use crate::bounds::{Clamp, ZoomLimits};
use crate::error::{Result, ensure_finite};
use crate::events::{EventQueue, PanZoomEvent};
use crate::gesture::{
    DOUBLE_TAP_MS, KEYBOARD_MOVE_RATIO, PendingClick, Press, Session, Spread, scale_multiplier,
};
use crate::input::{
    EventInstructions, EventResponse, KeyInput, PointerButton, PointerInput, TouchInput,
    WheelInput, centroid,
};
use crate::kinetic::Kinetic;
use crate::options::{Options, TransformOrigin, validate_zoom_speed};
use crate::surface::Surface;
use crate::transform::{AspectMode, Transform};

#[derive(Debug)]
struct MoveAnimation {
    tween: Tween<Vec2>,
    applied: Vec2,
}

#[derive(Debug)]
struct ZoomAnimation {
    tween: Tween<f64>,
    focal: Point,
}

/// Pan/zoom controller for one surface.
#[derive(Debug)]
pub struct PanZoom<S> {
    surface: S,
    options: Options,
    limits: ZoomLimits,
    transform: Transform,
    kinetic: Kinetic,
    session: Session,
    move_animation: Option<MoveAnimation>,
    zoom_animation: Option<ZoomAnimation>,
    pending_click: Option<PendingClick>,
    last_touch_end: Option<u64>,
    events: EventQueue,
    dirty: bool,
    paused: bool,
    disposed: bool,
}

impl<S: Surface> PanZoom<S> {
    /// Creates an engine driving `surface`.
    ///
    /// The starting transform is, in order of precedence: the configured
    /// initial values, the surface's current presentation, the identity.
    /// Its scale is clamped into the zoom limits.
    /// With `autocenter` set, the content is then fitted into view. The first
    /// [`frame`](Self::frame) paints it.
    pub fn new(mut surface: S, options: Options) -> Result<Self> {
        options.validate()?;
        let limits = options.zoom_limits()?;

        let mut transform = Transform::identity(options.aspect);
        if let Some(seed) = surface.initial_transform() {
            transform.set_translation(seed.translation())?;
            transform.set_scale_xy(
                limits.clamp(seed.scale_x()),
                limits.clamp(seed.scale_y()),
            )?;
        }
        transform.set_translation(Vec2::new(
            options.initial_x.unwrap_or(transform.x),
            options.initial_y.unwrap_or(transform.y),
        ))?;
        if let Some(zoom) = options.initial_zoom {
            transform.set_scale(limits.clamp(zoom))?;
        }

        let kinetic = Kinetic::from(options.smooth_scroll);
        let autocenter = options.autocenter;
        let mut panzoom = Self {
            surface,
            options,
            limits,
            transform,
            kinetic,
            session: Session::default(),
            move_animation: None,
            zoom_animation: None,
            pending_click: None,
            last_touch_end: None,
            events: EventQueue::default(),
            dirty: true,
            paused: false,
            disposed: false,
        };
        if autocenter {
            panzoom.autocenter();
        }
        log::debug!("panzoom created with transform {:?}", panzoom.transform);
        Ok(panzoom)
    }

    /// The current transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Aspect mode chosen at construction.
    #[must_use]
    pub fn aspect(&self) -> AspectMode {
        self.options.aspect
    }

    /// The driven surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the driven surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Takes and returns every queued notification, oldest first.
    ///
    /// At most [`MAX_QUEUED_EVENTS`](crate::MAX_QUEUED_EVENTS) are kept
    /// between drains.
    pub fn drain_events(&mut self) -> Vec<PanZoomEvent> {
        self.events.drain()
    }

    /// Whether the host should keep calling [`frame`](Self::frame).
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        !self.disposed
            && (self.dirty
                || self.move_animation.is_some()
                || self.zoom_animation.is_some()
                || self.kinetic.is_active()
                || self.pending_click.is_some())
    }

    /// Whether a drag currently owns the document-level pointer or touch
    /// stream. Hosts may use this to decide when to listen beyond the owner.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.session.mouse_captured || self.session.touch_in_progress
    }

    /// Advances time to `now` and paints if anything changed.
    ///
    /// Order within a frame: inertia, the move animation, the zoom
    /// animation, a due click, then at most one paint.
    pub fn frame(&mut self, now: u64) {
        if self.disposed {
            return;
        }

        let position = self.transform.translation().to_point();
        if let Some(next) = self.kinetic.poll(now, position) {
            self.cancel_zoom_animation();
            self.set_translation(next.to_vec2());
        }

        if let Some(animation) = &mut self.move_animation {
            if let Some(step) = animation.tween.step() {
                let delta = step.value() - animation.applied;
                animation.applied = step.value();
                if step.is_finished() {
                    self.move_animation = None;
                }
                self.set_translation(self.transform.translation() + delta);
            } else {
                self.move_animation = None;
            }
        }

        if let Some(animation) = &mut self.zoom_animation {
            let focal = animation.focal;
            match animation.tween.step() {
                Some(TweenStep::Running(scale)) => self.zoom_abs_unchecked(focal, scale),
                Some(TweenStep::Finished(scale)) => {
                    self.zoom_animation = None;
                    self.zoom_abs_unchecked(focal, scale);
                    self.events.push(PanZoomEvent::ZoomEnd);
                }
                None => self.zoom_animation = None,
            }
        }

        if let Some(click) = self.pending_click {
            if click.deadline <= now {
                self.pending_click = None;
                if let Some(on_click) = self.options.hooks.on_click.as_mut() {
                    on_click(click.point);
                }
            }
        }

        if self.dirty {
            self.dirty = false;
            self.surface.apply_transform(&self.transform);
            self.events.push(PanZoomEvent::Transform);
        }
    }

    // --- Input ---

    /// Mouse press on the owner.
    pub fn handle_pointer_down(&mut self, input: &PointerInput) -> EventResponse {
        if !self.is_listening() {
            return EventResponse::PASS;
        }
        if self.session.touch_in_progress {
            // Compatibility mouse events synthesized from touch.
            return EventResponse {
                prevent_default: false,
                stop_propagation: true,
            };
        }

        let primary = input.button == PointerButton::Primary;
        let mut instructions = match self.options.hooks.before_mouse_down.as_mut() {
            Some(hook) => hook(input),
            None => EventInstructions::new(!primary, true),
        };
        instructions.ignore |= !primary;
        let response = instructions.response();
        if instructions.ignore {
            return response;
        }

        self.kinetic.cancel();
        self.pending_click = None;
        let point = self.owner_point(input.position);
        self.session.mouse_captured = true;
        self.session.last = point;
        self.session.press = Some(Press {
            time: input.time,
            position: point,
        });
        response
    }

    /// Mouse move anywhere in the document.
    pub fn handle_pointer_move(&mut self, input: &PointerInput) -> EventResponse {
        if !self.session.mouse_captured || self.session.touch_in_progress {
            return EventResponse::PASS;
        }
        let point = self.owner_point(input.position);
        let delta = point - self.session.last;
        if delta == Vec2::ZERO {
            return EventResponse::PASS;
        }
        self.trigger_pan_start(input.time);
        self.session.last = point;
        let delta = self.to_content_vector(delta);
        self.set_translation(self.transform.translation() + delta);
        EventResponse::PASS
    }

    /// Mouse release anywhere in the document.
    pub fn handle_pointer_up(&mut self, input: &PointerInput) -> EventResponse {
        if !self.session.mouse_captured {
            return EventResponse::PASS;
        }
        self.trigger_pan_end(input.time);
        let point = self.owner_point(input.position);
        if let Some(press) = self.session.press {
            if press.is_click(input.time, point) {
                self.schedule_click(input.time, point);
            }
        }
        self.session.release_mouse();
        EventResponse::PASS
    }

    /// Double click on the owner.
    pub fn handle_double_click(&mut self, input: &PointerInput) -> EventResponse {
        if !self.is_listening() {
            return EventResponse::PASS;
        }
        let instructions = match self.options.hooks.before_double_click.as_mut() {
            Some(hook) => hook(input),
            None => EventInstructions::HANDLE,
        };
        let response = instructions.response();
        if instructions.ignore {
            return response;
        }
        self.pending_click = None;
        let focal = self.focal_or(self.owner_point(input.position));
        self.start_smooth_zoom(focal, self.options.zoom_double_click_speed);
        response
    }

    /// Touch start on the owner.
    pub fn handle_touch_start(&mut self, input: &TouchInput) -> EventResponse {
        if !self.is_listening() {
            return EventResponse::PASS;
        }
        let instructions = match self.options.hooks.before_touch.as_mut() {
            Some(hook) => hook(input),
            None => EventInstructions::HANDLE,
        };
        let response = instructions.response();
        if instructions.ignore {
            return response;
        }

        self.cache_touches(&input.touches);
        if !self.session.touch_in_progress {
            self.session.touch_in_progress = true;
            self.kinetic.cancel();
            self.session.press = Some(Press {
                time: input.time,
                position: self.session.last,
            });
        }
        response
    }

    /// Touch move anywhere in the document.
    pub fn handle_touch_move(&mut self, input: &TouchInput) -> EventResponse {
        if !self.session.touch_in_progress {
            return EventResponse::PASS;
        }
        if self.session.touch_count != input.touches.len() {
            self.cache_touches(&input.touches);
        }
        let Some(center) = centroid(&input.touches) else {
            return EventResponse::CONSUME;
        };

        let point = self.owner_point(center);
        let delta = point - self.session.last;
        self.session.last = point;
        if delta != Vec2::ZERO {
            self.trigger_pan_start(input.time);
            let delta = self.to_content_vector(delta);
            self.set_translation(self.transform.translation() + delta);
        }

        if let ([a, b, ..], Some(baseline)) = (input.touches.as_slice(), self.session.pinch) {
            let current = Spread::measure(*a, *b);
            let ratio = if self.options.real_pinch {
                current.ratio_from(&baseline, self.options.aspect, self.options.pinch_speed)
            } else {
                let m = scale_multiplier(self.options.zoom_speed, current.step_direction(&baseline));
                Vec2::new(m, m)
            };
            if ratio != Vec2::new(1.0, 1.0) && ratio.x > 0.0 && ratio.y > 0.0 {
                let focal = self.focal_or(point);
                self.kinetic.cancel();
                self.cancel_zoom_animation();
                self.zoom_by_ratio(focal, ratio);
            }
            self.session.pinch = Some(current);
        }
        EventResponse::CONSUME
    }

    /// Touch end anywhere in the document.
    pub fn handle_touch_end(&mut self, input: &TouchInput) -> EventResponse {
        if !self.session.touch_in_progress {
            return EventResponse::PASS;
        }
        self.pending_click = None;

        if !input.touches.is_empty() {
            self.cache_touches(&input.touches);
            return EventResponse::CONSUME;
        }

        let now = input.time;
        // Where the last finger lifted, when the host reports it.
        let last = centroid(&input.changed)
            .map_or(self.session.last, |lifted| self.owner_point(lifted));
        let double_tap = self
            .last_touch_end
            .is_some_and(|previous| now.saturating_sub(previous) < DOUBLE_TAP_MS);
        if double_tap {
            log::trace!("double tap at {last:?}");
            let focal = self.focal_or(last);
            self.start_smooth_zoom(focal, self.options.zoom_double_click_speed);
        } else if !self.session.multitouch
            && self.session.press.is_some_and(|press| press.is_click(now, last))
        {
            self.schedule_click(now, last);
        }
        self.last_touch_end = Some(now);

        self.trigger_pan_end(now);
        if self.session.multitouch {
            self.events.push(PanZoomEvent::ZoomEnd);
        }
        self.session.release_touches();
        EventResponse::CONSUME
    }

    /// Touch cancel; treated like a touch end.
    pub fn handle_touch_cancel(&mut self, input: &TouchInput) -> EventResponse {
        self.handle_touch_end(input)
    }

    /// Wheel or trackpad scroll over the owner.
    pub fn handle_wheel(&mut self, input: &WheelInput) -> EventResponse {
        if !self.is_listening() {
            return EventResponse::PASS;
        }
        let instructions = match self.options.hooks.before_wheel.as_mut() {
            Some(hook) => hook(input),
            None => EventInstructions::HANDLE,
        };
        if instructions.ignore {
            return EventResponse::PASS;
        }

        self.kinetic.cancel();
        let multiplier = scale_multiplier(self.options.zoom_speed, input.lines());
        if multiplier == 1.0 {
            return EventResponse::PASS;
        }
        let focal = self.focal_or(self.owner_point(input.position));
        self.cancel_zoom_animation();
        self.zoom_by_ratio(focal, Vec2::new(multiplier, multiplier));
        EventResponse {
            prevent_default: !instructions.propagates(),
            stop_propagation: false,
        }
    }

    /// Key press while the owner has focus.
    pub fn handle_key_down(&mut self, input: &KeyInput) -> EventResponse {
        if !self.is_listening() || self.options.disable_keyboard_interaction {
            return EventResponse::PASS;
        }
        let instructions = match self.options.hooks.before_key_down.as_mut() {
            Some(hook) => hook(input),
            None => EventInstructions::HANDLE,
        };
        // The hook's propagation policy applies whatever the key.
        let response = instructions.response();
        if instructions.ignore {
            return response;
        }
        let (x, y, z) = input.key.intent();
        if (x, y, z) == (0, 0, 0) {
            return response;
        }
        if let Some(filter) = self.options.hooks.filter_key.as_mut() {
            if filter(input, x, y, z) {
                return response;
            }
        }

        let size = self.owner_size();
        if x != 0 || y != 0 {
            let step = size.width.min(size.height) * KEYBOARD_MOVE_RATIO;
            let delta = Vec2::new(step * f64::from(x), step * f64::from(y));
            self.set_translation(self.transform.translation() + delta);
        }
        if z != 0 {
            let multiplier = scale_multiplier(self.options.zoom_speed, f64::from(z));
            let center = Point::new(size.width / 2.0, size.height / 2.0);
            let focal = self.focal_or(center);
            self.kinetic.cancel();
            self.cancel_zoom_animation();
            self.zoom_by_ratio(focal, Vec2::new(multiplier, multiplier));
        }
        response
    }

    // --- Programmatic control ---

    /// Moves the content by `(dx, dy)`, optionally animated.
    ///
    /// An animated move replaces any move animation in progress.
    pub fn move_by(&mut self, dx: f64, dy: f64, smooth: bool) -> Result<()> {
        ensure_finite("move_by", &[dx, dy])?;
        if smooth {
            let tween = Tween::new(Vec2::ZERO, Vec2::new(dx, dy), TweenOptions::default());
            self.move_animation = Some(MoveAnimation {
                tween,
                applied: Vec2::ZERO,
            });
        } else {
            self.set_translation(self.transform.translation() + Vec2::new(dx, dy));
        }
        Ok(())
    }

    /// Moves the content so its translation is `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        ensure_finite("move_to", &[x, y])?;
        self.set_translation(Vec2::new(x, y));
        Ok(())
    }

    /// Animates the translation to `(x, y)`.
    pub fn smooth_move_to(&mut self, x: f64, y: f64) -> Result<()> {
        ensure_finite("smooth_move_to", &[x, y])?;
        let t = self.transform;
        self.move_by(x - t.x, y - t.y, true)
    }

    /// Animates so the center of `element_rect` (client coordinates) lands
    /// in the center of the owner.
    pub fn center_on(&mut self, element_rect: Rect) -> Result<()> {
        ensure_finite(
            "center_on",
            &[element_rect.x0, element_rect.y0, element_rect.x1, element_rect.y1],
        )?;
        let owner = self.surface.owner_rect();
        let target = element_rect.center() - owner.origin().to_vec2();
        let d = Point::new(owner.width() / 2.0, owner.height() / 2.0) - target;
        self.move_by(d.x, d.y, true)
    }

    /// Zooms by `ratio` about the owner-relative point `(x, y)`.
    ///
    /// Stops inertia and any zoom animation first.
    pub fn zoom_to(&mut self, x: f64, y: f64, ratio: f64) -> Result<()> {
        ensure_finite("zoom_to", &[x, y, ratio])?;
        self.kinetic.cancel();
        self.cancel_zoom_animation();
        if ratio > 0.0 {
            self.zoom_by_ratio(Point::new(x, y), Vec2::new(ratio, ratio));
        }
        Ok(())
    }

    /// Zooms to the absolute scale `zoom` about the owner-relative point
    /// `(x, y)`.
    pub fn zoom_abs(&mut self, x: f64, y: f64, zoom: f64) -> Result<()> {
        ensure_finite("zoom_abs", &[x, y, zoom])?;
        self.zoom_abs_unchecked(Point::new(x, y), zoom);
        Ok(())
    }

    /// Animates a zoom by `ratio` about `(x, y)`.
    ///
    /// Emits [`PanZoomEvent::ZoomEnd`] when the animation completes.
    pub fn smooth_zoom(&mut self, x: f64, y: f64, ratio: f64) -> Result<()> {
        ensure_finite("smooth_zoom", &[x, y, ratio])?;
        self.start_smooth_zoom(Point::new(x, y), ratio);
        Ok(())
    }

    /// Animates a zoom to the absolute scale `zoom` about `(x, y)`.
    pub fn smooth_zoom_abs(&mut self, x: f64, y: f64, zoom: f64) -> Result<()> {
        ensure_finite("smooth_zoom_abs", &[x, y, zoom])?;
        let from = self.transform.scale();
        self.start_zoom_animation(Point::new(x, y), from, zoom);
        Ok(())
    }

    /// Fits the content rectangle `rect` into the owner, centered.
    ///
    /// The fitted scale is clamped into the zoom limits.
    pub fn show_rectangle(&mut self, rect: Rect) -> Result<()> {
        let (w, h) = (rect.width(), rect.height());
        ensure_finite("show_rectangle", &[w, h])?;
        let size = self.to_content_vector(self.owner_size().to_vec2());
        let scale = self.limits.clamp((size.x / w).min(size.y / h));
        let mut next = self.transform;
        next.set_scale(scale)?;
        next.set_translation(Vec2::new(
            -(rect.x0 + w / 2.0) * scale + size.x / 2.0,
            -(rect.y0 + h / 2.0) * scale + size.y / 2.0,
        ))?;
        self.transform = next;
        self.dirty = true;
        Ok(())
    }

    /// Fits the content into the configured bounds, or the owner when
    /// unbounded. Empty content is left alone.
    pub fn autocenter(&mut self) {
        let bounds = self.resolved_bounds();
        let area = bounds.unwrap_or_else(|| Rect::from_origin_size(Point::ORIGIN, self.owner_size()));
        let content = self.surface.content_bounds();
        if content.width() == 0.0 || content.height() == 0.0 {
            log::debug!("autocenter skipped: content has no area");
            return;
        }
        let (w, h) = (area.width(), area.height());
        let scale = self.limits.clamp((w / content.width()).min(h / content.height()));
        let mut next = self.transform;
        let fitted = next.set_scale(scale).and_then(|()| {
            next.set_translation(Vec2::new(
                -(content.x0 + content.width() / 2.0) * scale + w / 2.0 + area.x0,
                -(content.y0 + content.height() / 2.0) * scale + h / 2.0 + area.y0,
            ))
        });
        if fitted.is_ok() {
            self.transform = next;
            self.dirty = true;
        } else {
            log::debug!("autocenter skipped: owner has no usable area");
        }
    }

    // --- Settings ---

    /// Smallest permitted scale.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.limits.min()
    }

    /// Sets the smallest permitted scale.
    pub fn set_min_zoom(&mut self, min_zoom: f64) -> Result<()> {
        self.limits = ZoomLimits::new(min_zoom, self.limits.max())?;
        self.options.min_zoom = min_zoom;
        Ok(())
    }

    /// Largest permitted scale.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.limits.max()
    }

    /// Sets the largest permitted scale.
    pub fn set_max_zoom(&mut self, max_zoom: f64) -> Result<()> {
        self.limits = ZoomLimits::new(self.limits.min(), max_zoom)?;
        self.options.max_zoom = max_zoom;
        Ok(())
    }

    /// Fixed zoom focal point, if any.
    #[must_use]
    pub fn transform_origin(&self) -> Option<TransformOrigin> {
        self.options.transform_origin
    }

    /// Sets or clears the fixed zoom focal point.
    pub fn set_transform_origin(&mut self, origin: Option<TransformOrigin>) -> Result<()> {
        if let Some(origin) = &origin {
            origin.validate()?;
        }
        self.options.transform_origin = origin;
        Ok(())
    }

    /// Wheel and keyboard zoom step.
    #[must_use]
    pub fn zoom_speed(&self) -> f64 {
        self.options.zoom_speed
    }

    /// Sets the wheel and keyboard zoom step.
    pub fn set_zoom_speed(&mut self, speed: f64) -> Result<()> {
        validate_zoom_speed(speed)?;
        self.options.zoom_speed = speed;
        Ok(())
    }

    // --- Lifecycle ---

    /// Stops reacting to input and cancels every animation.
    pub fn pause(&mut self) {
        if self.paused || self.disposed {
            return;
        }
        self.teardown();
        self.paused = true;
        log::debug!("panzoom paused");
    }

    /// Resumes reacting to input from a clean session.
    pub fn resume(&mut self) {
        if !self.paused || self.disposed {
            return;
        }
        self.paused = false;
        self.session = Session::default();
        self.dirty = true;
        log::debug!("panzoom resumed");
    }

    /// Whether input is currently ignored because of [`pause`](Self::pause).
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Permanently stops the engine. Later input and frames are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.teardown();
        self.disposed = true;
        self.dirty = false;
        log::debug!("panzoom disposed");
    }

    /// Whether [`dispose`](Self::dispose) was called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Consumes the engine, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    // --- Internals ---

    fn is_listening(&self) -> bool {
        !self.paused && !self.disposed
    }

    fn teardown(&mut self) {
        self.kinetic.cancel();
        self.move_animation = None;
        self.zoom_animation = None;
        self.pending_click = None;
        if self.session.pan_started {
            self.events.push(PanZoomEvent::PanEnd);
        }
        self.session = Session::default();
    }

    fn owner_size(&self) -> Size {
        self.surface.owner_rect().size()
    }

    /// Client point to owner-relative point.
    fn owner_point(&self, client: Point) -> Point {
        client - self.surface.owner_rect().origin().to_vec2()
    }

    /// Owner-relative point into the content's parent space.
    fn to_content_point(&self, p: Point) -> Point {
        match self.surface.screen_transform() {
            Some(screen) => screen.map_point(p),
            None => p,
        }
    }

    fn to_content_vector(&self, v: Vec2) -> Vec2 {
        match self.surface.screen_transform() {
            Some(screen) => screen.map_vector(v),
            None => v,
        }
    }

    fn focal_or(&self, point: Point) -> Point {
        match self.options.transform_origin {
            Some(origin) => origin.resolve(self.owner_size()),
            None => point,
        }
    }

    fn resolved_bounds(&self) -> Option<Rect> {
        self.options
            .bounds
            .resolve(self.owner_size(), self.options.bounds_padding)
    }

    fn clamp(&self) -> Clamp {
        Clamp {
            limits: self.limits,
            content: self.surface.content_bounds(),
            bounds: self.resolved_bounds(),
            hard_edge: self.options.hard_edge(),
        }
    }

    fn set_translation(&mut self, translation: Vec2) {
        self.transform = self.clamp().pan(&self.transform, translation);
        self.events.push(PanZoomEvent::Pan);
        self.dirty = true;
    }

    fn zoom_by_ratio(&mut self, point: Point, ratio: Vec2) {
        let focal = self.to_content_point(point);
        if let Some(next) = self.clamp().zoom(&self.transform, focal, ratio) {
            self.transform = next;
            self.events.push(PanZoomEvent::Zoom);
            self.dirty = true;
        }
    }

    fn zoom_abs_unchecked(&mut self, point: Point, zoom: f64) {
        let ratio = zoom / self.transform.scale();
        if ratio.is_finite() && ratio > 0.0 {
            self.zoom_by_ratio(point, Vec2::new(ratio, ratio));
        }
    }

    fn start_smooth_zoom(&mut self, focal: Point, ratio: f64) {
        let from = self.transform.scale();
        self.start_zoom_animation(focal, from, from * ratio);
    }

    fn start_zoom_animation(&mut self, focal: Point, from: f64, to: f64) {
        self.kinetic.cancel();
        self.cancel_zoom_animation();
        self.zoom_animation = Some(ZoomAnimation {
            tween: Tween::new(from, to, TweenOptions::default()),
            focal,
        });
    }

    fn cancel_zoom_animation(&mut self) {
        self.zoom_animation = None;
    }

    fn schedule_click(&mut self, now: u64, point: Point) {
        if self.options.hooks.on_click.is_some() {
            self.pending_click = Some(PendingClick {
                deadline: now + DOUBLE_TAP_MS,
                point,
            });
        }
    }

    fn cache_touches(&mut self, touches: &[Point]) {
        self.session.touch_count = touches.len();
        if let Some(center) = centroid(touches) {
            self.session.last = self.owner_point(center);
        }
        self.session.pinch = match touches {
            [a, b, ..] => Some(Spread::measure(*a, *b)),
            _ => None,
        };
        self.session.multitouch |= touches.len() > 1;
    }

    fn trigger_pan_start(&mut self, now: u64) {
        if !self.session.pan_started {
            self.session.pan_started = true;
            self.events.push(PanZoomEvent::PanStart);
            self.kinetic.start(now, self.transform.translation().to_point());
            log::trace!("pan start at {:?}", self.session.last);
        }
    }

    fn trigger_pan_end(&mut self, now: u64) {
        if self.session.pan_started {
            // No fling after a pinch.
            if !self.session.multitouch {
                self.kinetic.stop(now, self.transform.translation().to_point());
            }
            self.events.push(PanZoomEvent::PanEnd);
            log::trace!("pan end");
        }
    }
}
