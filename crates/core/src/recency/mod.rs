//! Recency labels ("2h ago") and the clock that keeps them fresh.
//!
//! [`elapsed_label`] is the pure rule; [`RecencyClock`] owns the repeating
//! timer that re-applies it to the current catalog snapshot and publishes
//! the result.

mod clock;

pub use clock::{LabelMap, RecencyClock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel label for movies with a missing or unparseable timestamp.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Configuration for the recency clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecencyConfig {
    /// How often to recompute labels, in seconds (default: 60).
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_refresh_interval() -> u64 {
    60
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

/// Human-readable "time since" label for an upload timestamp.
///
/// Truncation only, first match wins: whole days, else whole hours, else
/// whole minutes, else seconds. `None` (absent or unparseable timestamp)
/// yields [`UNKNOWN_LABEL`] without any arithmetic.
pub fn elapsed_label(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return UNKNOWN_LABEL.to_string();
    };

    let seconds = (now - created_at).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = seconds / 3600;
    let days = seconds / 86400;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        format!("{}s ago", seconds)
    }
}
