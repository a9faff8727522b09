//! Animation Set: an immutable collection of animations created together,
//! exposed as one combined awaitable. A pure combinator; no state machine of
//! its own. Aggregate stop goes through `Scheduler::stop_set`.

use crate::completion::CompletionSet;
use crate::ids::{AnimId, EntityId};

#[derive(Clone, Debug)]
pub struct AnimationSet {
    members: Vec<AnimId>,
    entities: Vec<EntityId>,
    completion: CompletionSet,
}

impl AnimationSet {
    pub(crate) fn new(
        members: Vec<AnimId>,
        entities: Vec<EntityId>,
        completion: CompletionSet,
    ) -> Self {
        Self {
            members,
            entities,
            completion,
        }
    }

    /// Member animations, one per entity, in creation order.
    pub fn members(&self) -> &[AnimId] {
        &self.members
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn completion(&self) -> &CompletionSet {
        &self.completion
    }

    /// Wait-for-all / fail-fast aggregate of the members' contracts.
    pub fn poll(&self) -> Option<Result<Vec<EntityId>, EntityId>> {
        self.completion.poll()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }
}
