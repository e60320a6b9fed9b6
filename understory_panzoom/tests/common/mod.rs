// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for engine integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]

use kurbo::Rect;
use understory_panzoom::{Options, PanZoom, ScreenTransform, Surface, Transform};

/// Length of one simulated display frame.
pub(crate) const FRAME_MS: u64 = 16;

/// Surface that records every painted transform.
#[derive(Debug)]
pub(crate) struct FakeSurface {
    pub(crate) content: Rect,
    pub(crate) owner: Rect,
    pub(crate) screen: Option<ScreenTransform>,
    pub(crate) paints: Vec<Transform>,
}

impl FakeSurface {
    /// 400x300 content inside an owner of the given client rectangle.
    pub(crate) fn new(owner: Rect) -> Self {
        Self {
            content: Rect::new(0.0, 0.0, 400.0, 300.0),
            owner,
            screen: None,
            paints: Vec::new(),
        }
    }
}

impl Surface for FakeSurface {
    fn content_bounds(&self) -> Rect {
        self.content
    }

    fn owner_rect(&self) -> Rect {
        self.owner
    }

    fn apply_transform(&mut self, transform: &Transform) {
        self.paints.push(*transform);
    }

    fn screen_transform(&self) -> Option<ScreenTransform> {
        self.screen
    }
}

/// Engine over an 800x600 owner at the client origin.
pub(crate) fn engine(options: Options) -> PanZoom<FakeSurface> {
    PanZoom::new(FakeSurface::new(Rect::new(0.0, 0.0, 800.0, 600.0)), options)
        .expect("valid options")
}

/// Steps frames from `now` until the engine is idle; returns the last time.
pub(crate) fn settle(panzoom: &mut PanZoom<FakeSurface>, mut now: u64) -> u64 {
    for _ in 0..1000 {
        panzoom.frame(now);
        if !panzoom.needs_frame() {
            return now;
        }
        now += FRAME_MS;
    }
    panic!("engine did not settle");
}

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
