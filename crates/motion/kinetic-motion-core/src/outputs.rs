//! Output contract from the scheduler.
//!
//! Outputs carry the semantic events of one tick; hosts read them from the
//! `tick()` return value and transport them to observers. The visual updates
//! themselves go through the per-animation callbacks, never through here.

use serde::{Deserialize, Serialize};

use crate::ids::{AnimId, EntityId};

/// Discrete signals emitted while stepping.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SchedulerEvent {
    ClockStarted,
    ClockIdle,
    AnimationFinished {
        entity: EntityId,
        anim: AnimId,
    },
    AnimationStopped {
        entity: EntityId,
        anim: AnimId,
        finished: bool,
    },
    QueueDrained {
        entity: EntityId,
        queue: String,
    },
    QueueFailed {
        entity: EntityId,
        queue: String,
        message: String,
    },
    /// Catch-all for forward-compatible payloads.
    Custom {
        kind: String,
        data: serde_json::Value,
    },
}

/// Events of the current tick. Cleared at tick start; capped per
/// `Config::max_events_per_tick` (0 means uncapped).
///
/// Serialize-only: the buffer is owned and refilled by the scheduler, so
/// there is no flow that reads one back in.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Outputs {
    pub events: Vec<SchedulerEvent>,
    #[serde(skip)]
    cap: usize,
}

impl Outputs {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            events: Vec::new(),
            cap,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: SchedulerEvent) {
        if self.cap == 0 || self.events.len() < self.cap {
            self.events.push(event);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
