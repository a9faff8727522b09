//! Scheduler: data ownership and the public API.
//!
//! Owns the animation arena, the Animation Registry, the Task Queue Table,
//! pending delay timers, and the Frame Clock. All tables are explicit members
//! with documented lifecycle (created lazily, pruned on empty) rather than
//! ambient globals. Single-threaded cooperative: the host drives `tick()` from
//! one logical thread; the scheduler is `!Send` by construction.

use std::fmt;
use std::mem;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimOptions, Animation, Tick, TickOutcome, VisualUpdate};
use crate::clock::{ClockState, FrameClock};
use crate::completion::{Completion, CompletionSet, Settled};
use crate::config::Config;
use crate::ease::Easing;
use crate::error::QueueError;
use crate::ids::{AnimId, EntityId, IdAllocator};
use crate::outputs::{Outputs, SchedulerEvent};
use crate::param::Param;
use crate::queue::{OpOutcome, QueueOp, TaskQueueTable, DEFAULT_QUEUE};
use crate::registry::AnimationRegistry;
use crate::resolver::EntityResolver;
use crate::set::AnimationSet;

/// Options for `animate`. The `start` override is a value-or-computed
/// parameter resolved once at creation.
#[derive(Clone, Debug)]
pub struct AnimateOpts {
    pub duration_ms: f64,
    pub easing: Easing,
    pub infinite: bool,
    pub debug: bool,
    pub start: Option<Param<f64>>,
}

impl Default for AnimateOpts {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            easing: Easing::EaseInOut,
            infinite: false,
            debug: false,
            start: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct StopOpts {
    /// Run one final forced tick at progress 1 and resolve, instead of
    /// rejecting the completion contract.
    pub finish: bool,
}

impl Default for StopOpts {
    fn default() -> Self {
        Self { finish: true }
    }
}

/// Queue-name selection for `queue`/`delay`; `None` means `DEFAULT_QUEUE`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct QueueOpts {
    pub queue_name: Option<String>,
}

impl QueueOpts {
    fn effective(&self) -> &str {
        self.queue_name.as_deref().unwrap_or(DEFAULT_QUEUE)
    }
}

/// Queue-name selection for `clear_queue`; `None` clears every lane of the
/// entity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClearOpts {
    pub queue_name: Option<String>,
}

/// Minimal animation arena storage.
#[derive(Default)]
struct AnimArena {
    items: Vec<Animation>,
}

impl AnimArena {
    fn insert(&mut self, anim: Animation) {
        self.items.push(anim);
    }
    fn get(&self, id: AnimId) -> Option<&Animation> {
        self.items.iter().find(|a| a.id == id)
    }
    fn get_mut(&mut self, id: AnimId) -> Option<&mut Animation> {
        self.items.iter_mut().find(|a| a.id == id)
    }
    fn remove(&mut self, id: AnimId) -> Option<Animation> {
        let pos = self.items.iter().position(|a| a.id == id)?;
        Some(self.items.remove(pos))
    }
    fn len(&self) -> usize {
        self.items.len()
    }
}

/// A pending `delay`: resolves its contract once the host clock passes the
/// deadline.
struct DelayTimer {
    deadline_ms: f64,
    entity: EntityId,
    completion: Completion,
}

enum LaneStep {
    Run(QueueOp),
    Failed(QueueError),
    Drained,
    Waiting,
    Gone,
}

pub struct Scheduler {
    cfg: Config,
    ids: IdAllocator,
    anims: AnimArena,
    registry: AnimationRegistry,
    queues: TaskQueueTable,
    timers: Vec<DelayTimer>,
    clock: FrameClock,
    /// Events emitted between ticks (animate/stop/queue run outside the tick
    /// loop); drained into `outputs` at the start of the next tick so the
    /// host never misses them.
    pending_events: Vec<SchedulerEvent>,
    now_ms: f64,
    outputs: Outputs,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock.state())
            .field("animations", &self.anims.len())
            .field("entities", &self.registry.entity_count())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(cfg: Config) -> Self {
        Self {
            outputs: Outputs::with_cap(cfg.max_events_per_tick),
            cfg,
            ids: IdAllocator::new(),
            anims: AnimArena::default(),
            registry: AnimationRegistry::new(),
            queues: TaskQueueTable::new(),
            timers: Vec::new(),
            clock: FrameClock::new(),
            pending_events: Vec::new(),
            now_ms: 0.0,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    /// Host time of the current (or most recent) tick. Queue operations run
    /// inside a tick and use this to anchor animations they start.
    #[inline]
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    /// Anything left to drive: active animations, pending delays, or task
    /// queue lanes. The clock stays `Running` while this holds.
    pub fn has_work(&self) -> bool {
        !self.registry.is_empty() || !self.timers.is_empty() || !self.queues.is_empty()
    }

    #[inline]
    pub fn is_animating(&self, entity: EntityId) -> bool {
        self.registry.contains(entity)
    }

    #[inline]
    pub fn active_animation_count(&self) -> usize {
        self.registry.anim_count()
    }

    // ── animations ──────────────────────────────────────────────────────

    /// Start one animation per entity, registered under a shared callback and
    /// options. `now_ms` anchors the progress ramp unless `opts.start`
    /// overrides it. Non-blocking: completion is observed via the returned
    /// set's contracts.
    pub fn animate(
        &mut self,
        entities: &[EntityId],
        callback: VisualUpdate,
        now_ms: f64,
        opts: AnimateOpts,
    ) -> AnimationSet {
        let start = match &opts.start {
            Some(p) => p.resolve(),
            None => now_ms,
        };
        let options = AnimOptions {
            duration_ms: opts.duration_ms,
            easing: opts.easing,
            infinite: opts.infinite,
            debug: opts.debug,
            start,
        };

        let mut members = Vec::with_capacity(entities.len());
        let mut contracts = Vec::with_capacity(entities.len());
        for &entity in entities {
            let id = self.ids.alloc_anim();
            let anim = Animation::new(id, entity, Rc::clone(&callback), options.clone());
            contracts.push(anim.completion());
            self.registry.insert(entity, id);
            self.anims.insert(anim);
            members.push(id);
        }
        if !members.is_empty() {
            self.wake_clock();
        }
        AnimationSet::new(members, entities.to_vec(), CompletionSet::new(contracts))
    }

    /// Resolve entities through the host's resolver, then `animate`.
    pub fn animate_matching(
        &mut self,
        resolver: &mut dyn EntityResolver,
        selector: &str,
        callback: VisualUpdate,
        now_ms: f64,
        opts: AnimateOpts,
    ) -> AnimationSet {
        let entities = resolver.resolve(selector);
        self.animate(&entities, callback, now_ms, opts)
    }

    /// Synchronously halt every active animation on the given entities.
    /// Effective immediately: the animations are removed from further ticking
    /// before this returns.
    pub fn stop(&mut self, entities: &[EntityId], opts: StopOpts) {
        for &entity in entities {
            for anim in self.registry.remove_entity(entity) {
                self.stop_anim(entity, anim, opts.finish);
            }
        }
    }

    /// Forward a stop to every member of a set. Members that already settled
    /// are skipped.
    pub fn stop_set(&mut self, set: &AnimationSet, opts: StopOpts) {
        for (&anim, &entity) in set.members().iter().zip(set.entities()) {
            if self.registry.remove(entity, anim) {
                self.stop_anim(entity, anim, opts.finish);
            }
        }
    }

    /// Duplicate `src`'s in-flight animations onto `dst` (same callbacks and
    /// options, fresh contracts), as when a host clones a node together with
    /// its animations. Returns the new handles in source order.
    pub fn clone_animations(&mut self, src: EntityId, dst: EntityId) -> Vec<AnimId> {
        let src_ids = self.registry.anims_for(src).to_vec();
        let mut out = Vec::with_capacity(src_ids.len());
        for id in src_ids {
            let cloned = match self.anims.get(id) {
                Some(a) => a.clone_to(self.ids.alloc_anim(), dst),
                None => continue,
            };
            let new_id = cloned.id;
            self.registry.insert(dst, new_id);
            self.anims.insert(cloned);
            out.push(new_id);
        }
        if !out.is_empty() {
            self.wake_clock();
        }
        out
    }

    /// Completion handle for a still-live animation.
    pub fn completion_of(&self, anim: AnimId) -> Option<Completion> {
        self.anims.get(anim).map(Animation::completion)
    }

    fn stop_anim(&mut self, entity: EntityId, anim: AnimId, finish: bool) {
        if let Some(a) = self.anims.get_mut(anim) {
            if a.stop(finish) {
                self.emit(SchedulerEvent::AnimationStopped {
                    entity,
                    anim,
                    finished: finish,
                });
            }
        }
        self.anims.remove(anim);
    }

    fn wake_clock(&mut self) {
        if self.clock.wake() {
            self.emit(SchedulerEvent::ClockStarted);
        }
    }

    /// Mid-tick events go straight to the current outputs; events raised
    /// between ticks are buffered for the next one.
    fn emit(&mut self, event: SchedulerEvent) {
        if self.clock.in_tick() {
            self.outputs.push_event(event);
        } else {
            self.pending_events.push(event);
        }
    }

    // ── task queues ─────────────────────────────────────────────────────

    /// Enqueue a deferred operation on the entity's named lane. The operation
    /// never runs inline with this call; it starts on a later tick, strictly
    /// after everything already queued on the same lane.
    pub fn queue<F>(&mut self, entity: EntityId, op: F, opts: QueueOpts)
    where
        F: FnOnce(&mut Scheduler, EntityId) -> Result<OpOutcome, QueueError> + 'static,
    {
        self.queues.enqueue(entity, opts.effective(), Box::new(op));
        self.wake_clock();
    }

    /// Enqueue a pause: no side effect besides the passage of time.
    pub fn delay(&mut self, entity: EntityId, duration_ms: f64, opts: QueueOpts) {
        self.queue(
            entity,
            move |sched: &mut Scheduler, entity| {
                Ok(OpOutcome::Wait(sched.start_delay(entity, duration_ms)))
            },
            opts,
        );
    }

    /// Drop pending (not-yet-started) operations. An operation currently
    /// executing, or an in-flight awaitable, is unaffected.
    pub fn clear_queue(&mut self, entity: EntityId, opts: ClearOpts) {
        self.queues.clear(entity, opts.queue_name.as_deref());
    }

    /// Contract that resolves once the host clock passes `now + duration`.
    /// Only meaningful from inside a tick (queue operations run there).
    fn start_delay(&mut self, entity: EntityId, duration_ms: f64) -> Completion {
        let completion = Completion::new();
        self.timers.push(DelayTimer {
            deadline_ms: self.now_ms + duration_ms,
            entity,
            completion: completion.clone(),
        });
        completion
    }

    // ── tick loop ───────────────────────────────────────────────────────

    /// One Frame Clock tick at host time `now_ms`: resolve due timers, advance
    /// every registered animation, drain task queues, then transition the
    /// clock to `Idle` if nothing remains. Reentrant calls are no-ops.
    pub fn tick(&mut self, now_ms: f64) -> &Outputs {
        if !self.clock.begin_tick() {
            return &self.outputs;
        }
        self.outputs.clear();
        for event in mem::take(&mut self.pending_events) {
            self.outputs.push_event(event);
        }
        self.now_ms = now_ms;

        self.resolve_due_timers(now_ms);

        // Snapshot so finished animations may deregister mid-iteration.
        for (entity, anims) in self.registry.snapshot() {
            for anim in anims {
                self.advance_animation(entity, anim, now_ms);
            }
        }

        self.pump_queues();

        let was_running = self.clock.state() == ClockState::Running;
        let state = self.clock.end_tick(self.has_work());
        if was_running && state == ClockState::Idle {
            self.outputs.push_event(SchedulerEvent::ClockIdle);
        }
        &self.outputs
    }

    fn resolve_due_timers(&mut self, now_ms: f64) {
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].deadline_ms <= now_ms {
                let timer = self.timers.swap_remove(i);
                timer.completion.resolve(timer.entity);
            } else {
                i += 1;
            }
        }
    }

    fn advance_animation(&mut self, entity: EntityId, anim: AnimId, now_ms: f64) {
        let outcome = match self.anims.get_mut(anim) {
            Some(a) => a.tick(Tick::At(now_ms)),
            None => return,
        };
        if outcome == TickOutcome::Finished {
            self.registry.remove(entity, anim);
            self.anims.remove(anim);
            self.outputs
                .push_event(SchedulerEvent::AnimationFinished { entity, anim });
        }
    }

    /// Drain every lane as far as it will go this tick. Within one lane,
    /// operations run strictly in enqueue order, one at a time; lanes are
    /// fully independent of each other.
    fn pump_queues(&mut self) {
        for (entity, name) in self.queues.lane_keys() {
            self.pump_lane(entity, &name);
        }
    }

    fn pump_lane(&mut self, entity: EntityId, name: &str) {
        loop {
            let step = match self.queues.lane_mut(entity, name) {
                None => LaneStep::Gone,
                Some(lane) => match lane.in_flight.as_ref().map(Completion::poll) {
                    Some(None) => LaneStep::Waiting,
                    Some(Some(Settled::Rejected(_))) => LaneStep::Failed(QueueError::Cancelled),
                    Some(Some(Settled::Resolved(_))) | None => {
                        lane.in_flight = None;
                        match lane.pending.pop_front() {
                            Some(op) => LaneStep::Run(op),
                            None => LaneStep::Drained,
                        }
                    }
                },
            };
            match step {
                LaneStep::Gone | LaneStep::Waiting => return,
                LaneStep::Drained => {
                    self.queues.remove_lane(entity, name);
                    self.outputs.push_event(SchedulerEvent::QueueDrained {
                        entity,
                        queue: name.to_string(),
                    });
                    return;
                }
                LaneStep::Failed(err) => {
                    // Terminal for this lane only; other lanes and entities
                    // are unaffected.
                    self.queues.remove_lane(entity, name);
                    self.outputs.push_event(SchedulerEvent::QueueFailed {
                        entity,
                        queue: name.to_string(),
                        message: err.to_string(),
                    });
                    return;
                }
                LaneStep::Run(op) => match op(self, entity) {
                    Ok(OpOutcome::Complete) => continue,
                    Ok(OpOutcome::Wait(contract)) => {
                        // The op may have cleared its own lane; tolerate that.
                        if let Some(lane) = self.queues.lane_mut(entity, name) {
                            lane.in_flight = Some(contract);
                        }
                        continue;
                    }
                    Err(err) => {
                        self.queues.remove_lane(entity, name);
                        self.outputs.push_event(SchedulerEvent::QueueFailed {
                            entity,
                            queue: name.to_string(),
                            message: err.to_string(),
                        });
                        return;
                    }
                },
            }
        }
    }
}
