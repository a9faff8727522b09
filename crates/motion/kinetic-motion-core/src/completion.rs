//! Completion contracts: the resolve/reject interface by which callers observe
//! an Animation's (or Animation Set's) outcome.
//!
//! The scheduling model is single-threaded cooperative, so a shared
//! `Rc<RefCell<..>>` cell is sufficient; there is no cross-thread story here.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ids::EntityId;

/// Terminal outcome of a contract. Resolution carries the entity the
/// animation acted on; rejection signals cancellation-without-completion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Settled {
    Resolved(EntityId),
    Rejected(EntityId),
}

/// Single-assignment completion cell. The first settle wins; later resolve or
/// reject calls are no-ops. Cloning shares the same cell.
#[derive(Clone, Debug, Default)]
pub struct Completion {
    inner: Rc<RefCell<Option<Settled>>>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, entity: EntityId) {
        let mut slot = self.inner.borrow_mut();
        if slot.is_none() {
            *slot = Some(Settled::Resolved(entity));
        }
    }

    pub fn reject(&self, entity: EntityId) {
        let mut slot = self.inner.borrow_mut();
        if slot.is_none() {
            *slot = Some(Settled::Rejected(entity));
        }
    }

    #[inline]
    pub fn poll(&self) -> Option<Settled> {
        *self.inner.borrow()
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.poll().is_some()
    }
}

/// Pure combinator over member contracts: rejects as soon as any member has
/// rejected (fail fast), resolves with the ordered entity list once all
/// members have resolved.
#[derive(Clone, Debug, Default)]
pub struct CompletionSet {
    members: Vec<Completion>,
}

impl CompletionSet {
    pub fn new(members: Vec<Completion>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Completion] {
        &self.members
    }

    pub fn poll(&self) -> Option<Result<Vec<EntityId>, EntityId>> {
        // Fail fast: a rejection anywhere settles the set even while other
        // members are still pending.
        for m in &self.members {
            if let Some(Settled::Rejected(entity)) = m.poll() {
                return Some(Err(entity));
            }
        }
        let mut resolved = Vec::with_capacity(self.members.len());
        for m in &self.members {
            match m.poll() {
                Some(Settled::Resolved(entity)) => resolved.push(entity),
                _ => return None,
            }
        }
        Some(Ok(resolved))
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.poll().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_settle_wins() {
        let c = Completion::new();
        let e = EntityId(1);
        c.resolve(e);
        c.reject(EntityId(2));
        assert_eq!(c.poll(), Some(Settled::Resolved(e)));
    }

    #[test]
    fn set_waits_for_all_then_resolves_in_order() {
        let a = Completion::new();
        let b = Completion::new();
        let set = CompletionSet::new(vec![a.clone(), b.clone()]);
        assert!(set.poll().is_none());
        b.resolve(EntityId(2));
        assert!(set.poll().is_none());
        a.resolve(EntityId(1));
        assert_eq!(set.poll(), Some(Ok(vec![EntityId(1), EntityId(2)])));
    }

    #[test]
    fn set_rejects_fail_fast_while_members_pending() {
        let a = Completion::new();
        let b = Completion::new();
        let set = CompletionSet::new(vec![a, b.clone()]);
        b.reject(EntityId(9));
        assert_eq!(set.poll(), Some(Err(EntityId(9))));
    }
}
