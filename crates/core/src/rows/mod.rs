//! Auto-scrolling content rows.
//!
//! Each horizontal row is driven by its own [`AutoScrollController`]: a
//! timer advances the scroll offset by a fixed step while the row is
//! mounted, and manual nudges apply the same step immediately without
//! touching the timer. There is no paused state - ticks and nudges
//! interleave freely.

mod config;
mod controller;

pub use config::AutoScrollConfig;
pub use controller::AutoScrollController;

/// Lifecycle state of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Row not mounted; no timer exists.
    Idle,
    /// Timer active; the offset advances on every tick.
    Scrolling,
}

/// Direction of a manual nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}
