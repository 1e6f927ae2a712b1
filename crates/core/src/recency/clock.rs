//! The repeating clock behind recency labels.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{elapsed_label, RecencyConfig};
use crate::catalog::CatalogStore;
use crate::movie::MovieId;

/// Published label map: movie id to "time since" label.
pub type LabelMap = Arc<HashMap<MovieId, String>>;

/// Periodic scheduler that recomputes recency labels for every movie in
/// the catalog snapshot and publishes them to subscribers.
///
/// `start` and `stop` are idempotent; `stop` cancels the timer
/// deterministically - once it returns, no further recompute runs.
pub struct RecencyClock {
    catalog: Arc<CatalogStore>,
    period: Duration,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    labels_tx: Arc<watch::Sender<LabelMap>>,
}

impl RecencyClock {
    /// Create a stopped clock over the given catalog.
    pub fn new(catalog: Arc<CatalogStore>, config: RecencyConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (labels_tx, _) = watch::channel(Arc::new(HashMap::new()));

        Self {
            catalog,
            period: Duration::from_secs(config.refresh_interval_secs),
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            labels_tx: Arc::new(labels_tx),
        }
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// The most recently published label map.
    pub fn labels(&self) -> LabelMap {
        Arc::clone(&self.labels_tx.borrow())
    }

    /// Subscribe to label updates.
    pub fn subscribe(&self) -> watch::Receiver<LabelMap> {
        self.labels_tx.subscribe()
    }

    /// Start the timer (spawns the tick task). Publishes once immediately
    /// so consumers never observe an unlabeled snapshot.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Recency clock already running");
            return;
        }

        Self::recompute(&self.catalog, &self.labels_tx).await;

        let running = Arc::clone(&self.running);
        let catalog = Arc::clone(&self.catalog);
        let labels_tx = Arc::clone(&self.labels_tx);
        let period = self.period;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Recency clock started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Recency clock received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(period) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        Self::recompute(&catalog, &labels_tx).await;
                    }
                }
            }
            info!("Recency clock stopped");
        });
    }

    /// Stop the timer. Idempotent; after this returns no tick will
    /// recompute labels again.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_tx.send(());
    }

    /// Recompute labels for every movie in the current snapshot against
    /// the current wall clock and publish the full map.
    async fn recompute(catalog: &CatalogStore, labels_tx: &watch::Sender<LabelMap>) {
        let snapshot = catalog.snapshot().await;
        let now = Utc::now();

        let labels: HashMap<MovieId, String> = snapshot
            .iter()
            .map(|movie| (movie.id, elapsed_label(movie.created_at_utc(), now)))
            .collect();

        debug!("Recomputed {} recency labels", labels.len());
        labels_tx.send_replace(Arc::new(labels));
    }
}

impl Drop for RecencyClock {
    fn drop(&mut self) {
        self.stop();
    }
}
