//! Auto-scroll configuration.

use serde::{Deserialize, Serialize};

/// Configuration for row auto-scrolling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    /// How often the timer advances the row, in milliseconds
    /// (default: 4000).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Offset units applied per tick and per manual nudge (default: 200).
    #[serde(default = "default_step")]
    pub step: u32,

    /// Wrap back to the start when a tick would pass the end of the
    /// content (default: false - clamp at the end like a scroll
    /// container).
    #[serde(default)]
    pub wrap: bool,
}

fn default_tick_interval() -> u64 {
    4000
}

fn default_step() -> u32 {
    200
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            step: default_step(),
            wrap: false,
        }
    }
}
