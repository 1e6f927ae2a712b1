//! Per-row auto-scroll state machine.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{AutoScrollConfig, Direction, RowState};

/// Drives one horizontal row: `Idle` until mounted, then `Scrolling`
/// with a timer that advances the offset by a fixed step each tick.
/// Manual nudges apply the same step immediately and never pause, reset,
/// or desynchronize the timer. Unmounting cancels the timer
/// deterministically - after [`AutoScrollController::unmount`] returns,
/// no tick advances the offset again.
pub struct AutoScrollController {
    config: AutoScrollConfig,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    offset_tx: Arc<watch::Sender<u32>>,
    extent: Arc<AtomicU32>,
}

impl AutoScrollController {
    /// Create an idle controller for a row with the given content extent
    /// (the maximum scroll offset).
    pub fn new(config: AutoScrollConfig, extent: u32) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (offset_tx, _) = watch::channel(0);

        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            offset_tx: Arc::new(offset_tx),
            extent: Arc::new(AtomicU32::new(extent)),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RowState {
        if self.running.load(Ordering::Relaxed) {
            RowState::Scrolling
        } else {
            RowState::Idle
        }
    }

    /// Current scroll offset.
    pub fn offset(&self) -> u32 {
        *self.offset_tx.borrow()
    }

    /// Subscribe to offset updates.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.offset_tx.subscribe()
    }

    /// Update the content extent (e.g. the row was given more movies).
    /// The offset is re-clamped if it now lies past the end.
    pub fn set_extent(&self, extent: u32) {
        self.extent.store(extent, Ordering::Relaxed);
        self.offset_tx.send_if_modified(|offset| {
            if *offset > extent {
                *offset = extent;
                true
            } else {
                false
            }
        });
    }

    /// Mount the row: `Idle` -> `Scrolling`, spawning the tick timer.
    pub fn mount(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Row already mounted");
            return;
        }

        let running = Arc::clone(&self.running);
        let offset_tx = Arc::clone(&self.offset_tx);
        let extent = Arc::clone(&self.extent);
        let period = Duration::from_millis(self.config.tick_interval_ms);
        let step = self.config.step;
        let wrap = self.config.wrap;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            debug!("Row scroll timer started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                    _ = tokio::time::sleep(period) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        Self::advance(&offset_tx, &extent, step, wrap);
                    }
                }
            }
            debug!("Row scroll timer stopped");
        });

        info!("Row mounted");
    }

    /// Unmount the row: `Scrolling` -> `Idle`, cancelling the timer.
    /// Idempotent; unmounting an idle row is a no-op.
    pub fn unmount(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_tx.send(());
        info!("Row unmounted");
    }

    /// Apply one manual step immediately. Independent of the timer: the
    /// running cadence is neither paused nor reset.
    pub fn nudge(&self, direction: Direction) {
        let extent = self.extent.load(Ordering::Relaxed);
        let step = self.config.step;

        self.offset_tx.send_if_modified(|offset| {
            let next = match direction {
                Direction::Right => offset.saturating_add(step).min(extent),
                Direction::Left => offset.saturating_sub(step),
            };
            if next != *offset {
                *offset = next;
                true
            } else {
                false
            }
        });
    }

    /// One automatic forward step: clamp at the end of the content, or
    /// wrap back to the start when configured.
    fn advance(offset_tx: &watch::Sender<u32>, extent: &AtomicU32, step: u32, wrap: bool) {
        let extent = extent.load(Ordering::Relaxed);

        offset_tx.send_if_modified(|offset| {
            let next = if wrap && *offset >= extent {
                0
            } else {
                offset.saturating_add(step).min(extent)
            };
            if next != *offset {
                *offset = next;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for AutoScrollController {
    fn drop(&mut self) {
        self.unmount();
    }
}
