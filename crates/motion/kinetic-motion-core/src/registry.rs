//! Animation Registry: the single authority on "is anything animating."
//!
//! Explicit table owned by the Scheduler (not ambient global state), so unit
//! tests stay deterministic. Invariant: an entity never appears with an empty
//! list; absence means no active animations.

use hashbrown::HashMap;

use crate::ids::{AnimId, EntityId};

#[derive(Debug, Default)]
pub struct AnimationRegistry {
    entries: HashMap<EntityId, Vec<AnimId>>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an animation for an entity, creating the entry lazily.
    /// Per-entity order is insertion order.
    pub fn insert(&mut self, entity: EntityId, anim: AnimId) {
        self.entries.entry(entity).or_default().push(anim);
    }

    /// Remove one animation; prunes the entity entry when its list empties.
    /// Returns whether the animation was present.
    pub fn remove(&mut self, entity: EntityId, anim: AnimId) -> bool {
        let Some(list) = self.entries.get_mut(&entity) else {
            return false;
        };
        let Some(pos) = list.iter().position(|a| *a == anim) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.entries.remove(&entity);
        }
        true
    }

    /// Remove and return every animation registered for an entity.
    pub fn remove_entity(&mut self, entity: EntityId) -> Vec<AnimId> {
        self.entries.remove(&entity).unwrap_or_default()
    }

    pub fn anims_for(&self, entity: EntityId) -> &[AnimId] {
        self.entries.get(&entity).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entities with at least one active animation.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entries.len()
    }

    pub fn anim_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Owned copy of the current (entity, animations) pairs. The tick loop
    /// iterates this so it tolerates removals happening mid-iteration.
    pub fn snapshot(&self) -> Vec<(EntityId, Vec<AnimId>)> {
        self.entries
            .iter()
            .map(|(e, list)| (*e, list.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_empty_entries() {
        let mut reg = AnimationRegistry::new();
        let e = EntityId(0);
        reg.insert(e, AnimId(0));
        reg.insert(e, AnimId(1));
        assert_eq!(reg.anims_for(e), &[AnimId(0), AnimId(1)]);

        assert!(reg.remove(e, AnimId(0)));
        assert!(reg.contains(e));
        assert!(reg.remove(e, AnimId(1)));
        assert!(!reg.contains(e));
        assert!(reg.is_empty());
        assert!(!reg.remove(e, AnimId(1)));
    }
}
