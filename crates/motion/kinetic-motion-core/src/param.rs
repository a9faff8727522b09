//! Value-or-computed parameters.
//!
//! Callers may pass either a literal or a closure for certain options (e.g. a
//! start-timestamp override). The variant is resolved exactly once at
//! Animation creation, never per tick.

use std::fmt;
use std::rc::Rc;

pub enum Param<T> {
    Literal(T),
    Computed(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Param<T> {
    /// Resolve to a concrete value. `Computed` is invoked here and nowhere
    /// else; live recomputation is intentionally not supported.
    pub fn resolve(&self) -> T {
        match self {
            Param::Literal(v) => v.clone(),
            Param::Computed(f) => f(),
        }
    }
}

impl<T: Clone> Clone for Param<T> {
    fn clone(&self) -> Self {
        match self {
            Param::Literal(v) => Param::Literal(v.clone()),
            Param::Computed(f) => Param::Computed(Rc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            Param::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl<T> From<T> for Param<T> {
    fn from(v: T) -> Self {
        Param::Literal(v)
    }
}
