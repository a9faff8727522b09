//! Animation: a single time-bounded state machine bound to one entity and one
//! visual-update callback.
//!
//! Raw progress (termination test, infinite wrap) is kept separate from eased
//! progress (visual callback only), so a custom curve can never change when an
//! animation is considered done.

use std::fmt;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::completion::Completion;
use crate::ease::Easing;
use crate::ids::{AnimId, EntityId};

/// Options captured at creation. `start` is the host-clock timestamp the
/// progress ramp is anchored to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimOptions {
    pub duration_ms: f64,
    pub easing: Easing,
    pub infinite: bool,
    pub debug: bool,
    pub start: f64,
}

impl Default for AnimOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            easing: Easing::EaseInOut,
            infinite: false,
            debug: false,
            start: 0.0,
        }
    }
}

/// Externally authored visual-update function. Invoked synchronously once per
/// tick with the eased progress; it is the only side-effecting step of a tick
/// and is expected to mutate presentation state of the entity.
pub type VisualUpdate = Rc<dyn Fn(EntityId, f32, &AnimOptions)>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnimState {
    Running,
    Stopped,
    Finished,
}

/// One tick instruction. `Forced` drives the callback with progress exactly 1,
/// bypassing easing and the infinite wrap; it exists so forced completion is
/// an explicit variant rather than a null-timestamp sentinel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    At(f64),
    Forced,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    Running,
    Finished,
    AlreadySettled,
}

pub struct Animation {
    pub id: AnimId,
    pub entity: EntityId,
    callback: VisualUpdate,
    pub options: AnimOptions,
    state: AnimState,
    completion: Completion,
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("id", &self.id)
            .field("entity", &self.entity)
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Animation {
    /// Non-blocking create; the completion contract starts pending.
    pub fn new(id: AnimId, entity: EntityId, callback: VisualUpdate, options: AnimOptions) -> Self {
        Self {
            id,
            entity,
            callback,
            options,
            state: AnimState::Running,
            completion: Completion::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> AnimState {
        self.state
    }

    /// Shared handle to this animation's completion contract.
    pub fn completion(&self) -> Completion {
        self.completion.clone()
    }

    /// Advance to the given host time. No-op once stopped or finished.
    pub fn tick(&mut self, tick: Tick) -> TickOutcome {
        if self.state != AnimState::Running {
            return TickOutcome::AlreadySettled;
        }
        let now = match tick {
            Tick::Forced => {
                (self.callback)(self.entity, 1.0, &self.options);
                return TickOutcome::Running;
            }
            Tick::At(t) => t,
        };

        // Zero/negative duration completes on the first tick.
        let raw = if self.options.duration_ms > 0.0 {
            (now - self.options.start) / self.options.duration_ms
        } else {
            1.0
        };
        let progress = if self.options.infinite {
            raw.rem_euclid(1.0)
        } else {
            raw.clamp(0.0, 1.0)
        };
        let eased = self.options.easing.apply(progress as f32);
        if self.options.debug {
            debug!(
                "anim {:?} on {:?}: raw {:.4} eased {:.4}",
                self.id, self.entity, raw, eased
            );
        }
        (self.callback)(self.entity, eased, &self.options);

        if self.options.infinite || raw < 1.0 {
            return TickOutcome::Running;
        }
        self.state = AnimState::Finished;
        self.completion.resolve(self.entity);
        TickOutcome::Finished
    }

    /// Cancel. With `finish` the callback runs one final forced tick at
    /// progress 1 and the contract resolves; without it the contract is
    /// rejected with the entity. Returns false when already settled.
    /// Deregistration from the registry is the scheduler's job.
    pub fn stop(&mut self, finish: bool) -> bool {
        if self.state != AnimState::Running {
            return false;
        }
        if finish {
            let _ = self.tick(Tick::Forced);
            self.completion.resolve(self.entity);
        } else {
            self.completion.reject(self.entity);
        }
        self.state = AnimState::Stopped;
        true
    }

    /// New animation with the same callback and options bound to `entity`,
    /// with a fresh pending contract. State is not copied: the clone starts
    /// `Running` and is registered independently by the caller.
    pub fn clone_to(&self, id: AnimId, entity: EntityId) -> Animation {
        Animation::new(id, entity, Rc::clone(&self.callback), self.options.clone())
    }
}
