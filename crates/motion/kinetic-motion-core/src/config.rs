//! Core configuration for kinetic-motion-core.

use serde::{Deserialize, Serialize};

/// Scheduler sizing and host hints. Keep this minimal; expand as needed
/// without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Fallback tick interval for hosts without a frame-callback primitive
    /// (a fixed timer approximating one repaint).
    pub frame_interval_ms: f64,

    /// Maximum events retained per tick; 0 disables the cap.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16.0,
            max_events_per_tick: 1024,
        }
    }
}
