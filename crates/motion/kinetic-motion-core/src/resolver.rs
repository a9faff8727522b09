//! External collaborator seam: entity resolution.
//!
//! The core never parses selectors. A host-side resolver turns a selector-like
//! input into an ordered, duplicate-free entity list; the core only consumes
//! the result.

use crate::ids::EntityId;

pub trait EntityResolver {
    fn resolve(&mut self, selector: &str) -> Vec<EntityId>;
}
