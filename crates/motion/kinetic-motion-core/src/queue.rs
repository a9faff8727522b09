//! Task Queue Table: per-entity, per-named-queue FIFOs of deferred operations.
//!
//! An explicit queue plus single-consumer drain loop (the scheduler's tick),
//! not chained continuations: "one operation at a time, discard on failure" is
//! a structural invariant here. Operations never run inline with enqueue; the
//! first execution is always deferred to the next tick, which makes
//! enqueue-from-within-a-callback safe.
//!
//! Invariants: a present lane is either draining (has an in-flight awaitable)
//! or has pending operations; empty lanes are deleted immediately, and an
//! entity with no lanes is removed from the outer table.

use std::collections::VecDeque;
use std::fmt;

use hashbrown::HashMap;

use crate::completion::Completion;
use crate::error::QueueError;
use crate::ids::EntityId;
use crate::scheduler::Scheduler;

/// Queue name used when the caller does not pick one.
pub const DEFAULT_QUEUE: &str = "default";

/// What a queue operation produced. A synchronous result is wrapped
/// transparently as `Complete`; an asynchronous one parks the lane on the
/// given contract until it settles.
pub enum OpOutcome {
    Complete,
    Wait(Completion),
}

/// A deferred operation. Runs with the scheduler and the owning entity; a
/// returned error is terminal for the whole lane.
pub type QueueOp = Box<dyn FnOnce(&mut Scheduler, EntityId) -> Result<OpOutcome, QueueError>>;

pub(crate) struct Lane {
    pub(crate) pending: VecDeque<QueueOp>,
    pub(crate) in_flight: Option<Completion>,
}

impl Lane {
    fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            in_flight: None,
        }
    }
}

impl fmt::Debug for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lane")
            .field("pending", &self.pending.len())
            .field("in_flight", &self.in_flight.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct TaskQueueTable {
    lanes: HashMap<EntityId, HashMap<String, Lane>>,
}

impl TaskQueueTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an operation, creating the lane lazily.
    pub(crate) fn enqueue(&mut self, entity: EntityId, name: &str, op: QueueOp) {
        self.lanes
            .entry(entity)
            .or_default()
            .entry(name.to_string())
            .or_insert_with(Lane::new)
            .pending
            .push_back(op);
    }

    pub(crate) fn lane_mut(&mut self, entity: EntityId, name: &str) -> Option<&mut Lane> {
        self.lanes.get_mut(&entity)?.get_mut(name)
    }

    /// Delete a lane outright (drained or failed), pruning the entity entry.
    pub(crate) fn remove_lane(&mut self, entity: EntityId, name: &str) {
        if let Some(by_name) = self.lanes.get_mut(&entity) {
            by_name.remove(name);
            if by_name.is_empty() {
                self.lanes.remove(&entity);
            }
        }
    }

    /// Drop pending (not-yet-started) operations for one lane, or for all of
    /// the entity's lanes. An in-flight awaitable is left untouched; a lane
    /// that is neither draining nor non-empty afterwards is deleted.
    pub(crate) fn clear(&mut self, entity: EntityId, name: Option<&str>) {
        let Some(by_name) = self.lanes.get_mut(&entity) else {
            return;
        };
        match name {
            Some(name) => {
                if let Some(lane) = by_name.get_mut(name) {
                    lane.pending.clear();
                    if lane.in_flight.is_none() {
                        by_name.remove(name);
                    }
                }
            }
            None => {
                by_name.retain(|_, lane| {
                    lane.pending.clear();
                    lane.in_flight.is_some()
                });
            }
        }
        if by_name.is_empty() {
            self.lanes.remove(&entity);
        }
    }

    /// Snapshot of lane keys for the drain loop; owned so draining may mutate
    /// the table (including deleting the lane being drained).
    pub(crate) fn lane_keys(&self) -> Vec<(EntityId, String)> {
        self.lanes
            .iter()
            .flat_map(|(entity, by_name)| by_name.keys().map(|name| (*entity, name.clone())))
            .collect()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}
