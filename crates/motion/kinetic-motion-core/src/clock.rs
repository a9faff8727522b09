//! Frame Clock: explicit `Idle ⇄ Running` state machine.
//!
//! The host frame-callback primitive stays external: while the clock reports
//! `Running` the host drives `Scheduler::tick` once per frame (or on a
//! ~16 ms fallback timer, see `Config::frame_interval_ms`). Only one tick may
//! be in flight at a time; the model is cooperative, not reentrant.

use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ClockState {
    Idle,
    Running,
}

#[derive(Debug)]
pub struct FrameClock {
    state: ClockState,
    in_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
            in_tick: false,
        }
    }

    #[inline]
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Whether a tick is currently in flight.
    #[inline]
    pub fn in_tick(&self) -> bool {
        self.in_tick
    }

    /// Transition `Idle → Running`. Idempotent: waking an already-running
    /// clock is a no-op. Returns whether a transition happened.
    pub fn wake(&mut self) -> bool {
        if self.state == ClockState::Running {
            return false;
        }
        trace!("frame clock: idle -> running");
        self.state = ClockState::Running;
        true
    }

    /// Guard the start of a tick. Returns false when a tick is already in
    /// flight; the caller must then skip the tick entirely.
    pub fn begin_tick(&mut self) -> bool {
        if self.in_tick {
            return false;
        }
        self.in_tick = true;
        true
    }

    /// Close a tick. Transitions `Running → Idle` when no work remains.
    pub fn end_tick(&mut self, has_work: bool) -> ClockState {
        self.in_tick = false;
        if !has_work && self.state == ClockState::Running {
            trace!("frame clock: running -> idle");
            self.state = ClockState::Idle;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wake_is_idempotent() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.state(), ClockState::Idle);
        assert!(clock.wake());
        assert!(!clock.wake());
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn tick_guard_rejects_reentrancy() {
        let mut clock = FrameClock::new();
        clock.wake();
        assert!(clock.begin_tick());
        assert!(!clock.begin_tick());
        assert_eq!(clock.end_tick(true), ClockState::Running);
        assert!(clock.begin_tick());
        assert_eq!(clock.end_tick(false), ClockState::Idle);
    }
}
