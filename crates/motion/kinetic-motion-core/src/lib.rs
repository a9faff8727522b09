//! Kinetic Motion Core (host-agnostic)
//!
//! The animation scheduling engine and per-entity task queue behind a DOM
//! convenience layer: a single shared Frame Clock drives time-based visual
//! transitions for many entities concurrently, and per-entity named FIFO
//! lanes serialize chained deferred operations (animations, delays,
//! callbacks). Selector resolution, attribute/style access, and the rest of
//! the host glue live outside this crate; they supply the entity lists and
//! callbacks the core operates on.
//!
//! The scheduling model is single-threaded cooperative, mirroring one UI
//! thread: the host calls [`Scheduler::tick`] once per frame while the clock
//! reports `Running`.

pub mod animation;
pub mod clock;
pub mod completion;
pub mod config;
pub mod ease;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod param;
pub mod queue;
pub mod registry;
pub mod resolver;
pub mod scheduler;
pub mod set;

// Re-exports for consumers (host adapters)
pub use animation::{AnimOptions, AnimState, Animation, Tick, TickOutcome, VisualUpdate};
pub use clock::{ClockState, FrameClock};
pub use completion::{Completion, CompletionSet, Settled};
pub use config::Config;
pub use ease::Easing;
pub use error::QueueError;
pub use ids::{AnimId, EntityId, IdAllocator};
pub use outputs::{Outputs, SchedulerEvent};
pub use param::Param;
pub use queue::{OpOutcome, QueueOp, DEFAULT_QUEUE};
pub use registry::AnimationRegistry;
pub use resolver::EntityResolver;
pub use scheduler::{AnimateOpts, ClearOpts, QueueOpts, Scheduler, StopOpts};
pub use set::AnimationSet;
