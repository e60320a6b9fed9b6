// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications queued by the engine.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Most notifications kept between drains.
///
/// When a host never drains, the oldest notifications are dropped.
pub const MAX_QUEUED_EVENTS: usize = 256;

/// Semantic notification emitted as the transform changes.
///
/// Events carry no payload; read the engine's state after draining.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanZoomEvent {
    /// The first movement of a drag.
    PanStart,
    /// Translation changed.
    Pan,
    /// A drag that produced a [`PanZoomEvent::PanStart`] ended.
    PanEnd,
    /// Scale changed.
    Zoom,
    /// A smooth zoom finished or a pinch ended.
    ZoomEnd,
    /// The transform was painted to the surface.
    Transform,
}

/// Bounded FIFO of notifications.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventQueue {
    events: VecDeque<PanZoomEvent>,
    dropped: usize,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: PanZoomEvent) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<PanZoomEvent> {
        if self.dropped > 0 {
            log::trace!("dropped {} undrained notifications", self.dropped);
            self.dropped = 0;
        }
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventQueue, MAX_QUEUED_EVENTS, PanZoomEvent};

    #[test]
    fn drain_returns_oldest_first() {
        let mut queue = EventQueue::default();
        queue.push(PanZoomEvent::PanStart);
        queue.push(PanZoomEvent::Pan);
        assert_eq!(queue.drain(), [PanZoomEvent::PanStart, PanZoomEvent::Pan]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn undrained_queue_keeps_newest() {
        let mut queue = EventQueue::default();
        queue.push(PanZoomEvent::PanStart);
        for _ in 0..MAX_QUEUED_EVENTS {
            queue.push(PanZoomEvent::Pan);
        }
        queue.push(PanZoomEvent::PanEnd);
        let events = queue.drain();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        assert_eq!(events.first(), Some(&PanZoomEvent::Pan));
        assert_eq!(events.last(), Some(&PanZoomEvent::PanEnd));
    }
}
