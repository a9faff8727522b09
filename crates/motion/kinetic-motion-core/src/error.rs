//! Error taxonomy for the task-queue side of the core.
//!
//! Nothing here is fatal to the host: a failure terminates its own
//! `(entity, queue-name)` lane and propagates no further.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    /// A queued operation reported failure; the remaining pending operations
    /// of its lane are discarded.
    #[error("queue operation failed: {0}")]
    Op(String),

    /// The awaitable a queued operation was parked on was rejected
    /// (e.g. an animation stopped without finishing).
    #[error("queued operation cancelled before completion")]
    Cancelled,
}
