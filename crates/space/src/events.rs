//! Notifications raised during a tick and handed out in one batch.

use crate::body::BodyId;
use crate::frame::FrameId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceEvent {
    /// `b` is `None` when `a` hit terrain.
    Collision {
        a: BodyId,
        b: Option<BodyId>,
        /// Closing speed along the contact normal, m/s.
        relative_speed: f64,
    },
    FrameChanged {
        body: BodyId,
        from: FrameId,
        to: FrameId,
    },
    Killed {
        body: BodyId,
    },
}

/// Receives the events of a tick, in the order they were raised.
pub trait EventSink {
    fn deliver(&mut self, event: SpaceEvent);
}

impl EventSink for Vec<SpaceEvent> {
    fn deliver(&mut self, event: SpaceEvent) {
        self.push(event);
    }
}
