// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kinetic scrolling: velocity estimation while dragging and an exponential
//! fling after release.
//!
//! ## Usage
//!
//! 1) Call [`Kinetic::start`] when a pan begins.
//! 2) Call [`Kinetic::poll`] every frame with the current translation. While
//!    tracking it samples velocity at a fixed interval; while flinging it
//!    returns the next position to scroll to.
//! 3) Call [`Kinetic::stop`] when the pan ends to launch the fling, or
//!    [`Kinetic::cancel`] to drop everything silently.
//!
//! ```
//! use kurbo::Point;
//! use understory_panzoom::{Kinetic, KineticSettings};
//!
//! let mut kinetic = Kinetic::new(KineticSettings::default());
//! kinetic.start(0, Point::ORIGIN);
//! // Dragged 50 px to the right within 100 ms.
//! assert_eq!(kinetic.poll(100, Point::new(50.0, 0.0)), None);
//! kinetic.stop(100, Point::new(50.0, 0.0));
//!
//! let next = kinetic.poll(116, Point::new(50.0, 0.0)).unwrap();
//! assert!(next.x > 50.0);
//! ```

use kurbo::{Point, Vec2};

/// Tuning for [`Kinetic`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KineticSettings {
    /// Speed (px/s) an axis must exceed for a fling on that axis.
    pub min_velocity: f64,
    /// Fling distance per unit of velocity.
    pub amplitude: f64,
    /// Decay time constant in milliseconds.
    pub time_constant_ms: f64,
    /// Interval between velocity samples in milliseconds.
    pub sample_interval_ms: u64,
    /// Remaining distance (px) under which an axis stops.
    pub stop_distance: f64,
}

impl Default for KineticSettings {
    fn default() -> Self {
        Self {
            min_velocity: 10.0,
            amplitude: 0.42,
            time_constant_ms: 342.0,
            sample_interval_ms: 100,
            stop_distance: 0.5,
        }
    }
}

/// Whether release momentum is enabled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SmoothScroll {
    /// Rigid scrolling: no velocity tracking and no fling.
    Disabled,
    /// Kinetic scrolling with the given settings.
    Enabled(KineticSettings),
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::Enabled(KineticSettings::default())
    }
}

impl From<bool> for SmoothScroll {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::Disabled
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    Idle,
    Tracking {
        last: Point,
        last_sample_ms: u64,
        velocity: Vec2,
    },
    Flinging {
        target: Point,
        amplitude: Vec2,
        start_ms: u64,
    },
}

/// Velocity estimator and fling driver.
#[derive(Clone, Debug)]
pub struct Kinetic {
    settings: Option<KineticSettings>,
    state: State,
}

impl From<SmoothScroll> for Kinetic {
    fn from(mode: SmoothScroll) -> Self {
        match mode {
            SmoothScroll::Disabled => Self::rigid(),
            SmoothScroll::Enabled(settings) => Self::new(settings),
        }
    }
}

impl Kinetic {
    /// Creates an enabled estimator.
    #[must_use]
    pub fn new(settings: KineticSettings) -> Self {
        Self {
            settings: Some(settings),
            state: State::Idle,
        }
    }

    /// Creates a disabled estimator whose operations are all no-ops.
    #[must_use]
    pub fn rigid() -> Self {
        Self {
            settings: None,
            state: State::Idle,
        }
    }

    /// Returns `true` when kinetic scrolling is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.settings.is_some()
    }

    /// Returns `true` while sampling or flinging.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Returns `true` while a fling is in progress.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        matches!(self.state, State::Flinging { .. })
    }

    /// Begins sampling from `point`, dropping any fling in progress.
    pub fn start(&mut self, now_ms: u64, point: Point) {
        if self.settings.is_none() {
            return;
        }
        self.state = State::Tracking {
            last: point,
            last_sample_ms: now_ms,
            velocity: Vec2::ZERO,
        };
    }

    /// Advances the estimator to `now_ms`.
    ///
    /// While tracking, takes a velocity sample once per interval and returns
    /// `None`. While flinging, returns the next position, or `None` once the
    /// remaining motion is negligible on both axes.
    pub fn poll(&mut self, now_ms: u64, point: Point) -> Option<Point> {
        let settings = self.settings?;
        match &mut self.state {
            State::Idle => None,
            State::Tracking {
                last,
                last_sample_ms,
                velocity,
            } => {
                let elapsed = now_ms.saturating_sub(*last_sample_ms);
                if elapsed >= settings.sample_interval_ms {
                    let delta = point - *last;
                    // Samples per second, guarded against a zero interval.
                    let rate = 1000.0 / (1.0 + elapsed as f64);
                    *velocity = delta * (0.8 * rate) + *velocity * 0.2;
                    *last = point;
                    *last_sample_ms = now_ms;
                }
                None
            }
            State::Flinging {
                target,
                amplitude,
                start_ms,
            } => {
                let elapsed = now_ms.saturating_sub(*start_ms) as f64;
                let decay = libm::exp(-elapsed / settings.time_constant_ms);
                let mut moving = false;
                let mut offset = Vec2::ZERO;
                if amplitude.x != 0.0 {
                    offset.x = -amplitude.x * decay;
                    if offset.x.abs() > settings.stop_distance {
                        moving = true;
                    } else {
                        offset.x = 0.0;
                        amplitude.x = 0.0;
                    }
                }
                if amplitude.y != 0.0 {
                    offset.y = -amplitude.y * decay;
                    if offset.y.abs() > settings.stop_distance {
                        moving = true;
                    } else {
                        offset.y = 0.0;
                        amplitude.y = 0.0;
                    }
                }
                if moving {
                    Some(*target + offset)
                } else {
                    self.state = State::Idle;
                    None
                }
            }
        }
    }

    /// Stops sampling and launches a fling from `point` if the estimated
    /// velocity exceeds the threshold on either axis.
    pub fn stop(&mut self, now_ms: u64, point: Point) {
        let Some(settings) = self.settings else {
            return;
        };
        let State::Tracking { velocity, .. } = self.state else {
            self.state = State::Idle;
            return;
        };

        let mut amplitude = Vec2::ZERO;
        if velocity.x.abs() > settings.min_velocity {
            amplitude.x = settings.amplitude * velocity.x;
        }
        if velocity.y.abs() > settings.min_velocity {
            amplitude.y = settings.amplitude * velocity.y;
        }

        if amplitude == Vec2::ZERO {
            self.state = State::Idle;
            return;
        }
        log::trace!("kinetic fling with velocity {velocity:?}");
        self.state = State::Flinging {
            target: point + amplitude,
            amplitude,
            start_ms: now_ms,
        };
    }

    /// Halts sampling and any fling without producing further positions.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }
}
