//! Catalog store implementation.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use super::types::{CatalogError, CatalogEvent, CatalogStatus};
use crate::movie::Movie;
use crate::remote::MovieService;

/// Buffer size for catalog change events.
const EVENT_BUFFER_SIZE: usize = 16;

struct Inner {
    snapshot: Arc<[Movie]>,
    loading: bool,
    error: Option<String>,
    /// Bumped once per completed load (success or failure). Used to let
    /// callers that waited out an in-flight load adopt its outcome.
    generation: u64,
}

/// Holds the fetched movie collection and its loading/error status.
///
/// Concurrent [`CatalogStore::load`] calls coalesce onto a single
/// in-flight request: the first caller fetches, later callers wait for
/// that fetch and return its outcome without hitting the service again.
pub struct CatalogStore {
    service: Arc<dyn MovieService>,
    inner: RwLock<Inner>,
    /// Serializes loads. Held across the fetch await.
    load_lock: Mutex<()>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogStore {
    /// Create an empty store backed by the given service.
    pub fn new(service: Arc<dyn MovieService>) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            service,
            inner: RwLock::new(Inner {
                snapshot: Arc::from(Vec::new()),
                loading: false,
                error: None,
                generation: 0,
            }),
            load_lock: Mutex::new(()),
            events,
        }
    }

    /// Subscribe to catalog change events.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    /// The current immutable snapshot, in the order received.
    pub async fn snapshot(&self) -> Arc<[Movie]> {
        Arc::clone(&self.inner.read().await.snapshot)
    }

    /// The current load status.
    pub async fn status(&self) -> CatalogStatus {
        let inner = self.inner.read().await;
        CatalogStatus {
            loading: inner.loading,
            error: inner.error.clone(),
        }
    }

    /// Fetch the full catalog and replace the snapshot wholesale.
    ///
    /// On failure the prior snapshot is retained, the error flag is
    /// raised, and the error is returned; there is no automatic retry.
    /// A call made while another load is in flight does not issue a
    /// second request - it waits and reports the in-flight load's
    /// outcome.
    pub async fn load(&self) -> Result<(), CatalogError> {
        let observed = self.inner.read().await.generation;

        let _guard = self.load_lock.lock().await;

        // A load completed while we were waiting for the lock; adopt it.
        {
            let inner = self.inner.read().await;
            if inner.generation != observed {
                debug!("Coalesced onto an already-completed catalog load");
                return match &inner.error {
                    None => Ok(()),
                    Some(message) => Err(CatalogError::Fetch(message.clone())),
                };
            }
        }

        self.inner.write().await.loading = true;
        self.emit(CatalogEvent::LoadStarted);

        let result = self.service.list_movies().await;

        let mut inner = self.inner.write().await;
        inner.loading = false;
        inner.generation += 1;

        match result {
            Ok(movies) => {
                let count = movies.len();
                inner.snapshot = Arc::from(movies);
                inner.error = None;
                drop(inner);

                info!("Catalog loaded: {} movies", count);
                self.emit(CatalogEvent::Loaded { count });
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                inner.error = Some(message.clone());
                drop(inner);

                warn!("Catalog load failed, keeping prior snapshot: {}", message);
                self.emit(CatalogEvent::LoadFailed {
                    message: message.clone(),
                });
                Err(CatalogError::Fetch(message))
            }
        }
    }

    /// Emit an event; send errors (no live subscribers) are ignored so a
    /// late fetch resolution never faults after consumers are gone.
    fn emit(&self, event: CatalogEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockMovieService, RecordedCall};

    #[tokio::test]
    async fn test_starts_empty_and_idle() {
        let service = Arc::new(MockMovieService::new());
        let store = CatalogStore::new(service);

        assert!(store.snapshot().await.is_empty());
        assert_eq!(store.status().await, CatalogStatus::default());
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot_in_received_order() {
        let service = Arc::new(MockMovieService::new());
        service
            .set_movies(vec![
                fixtures::movie(2, "Beta", "Drama"),
                fixtures::movie(1, "Alpha", "Action"),
            ])
            .await;

        let store = CatalogStore::new(Arc::clone(&service) as Arc<dyn MovieService>);
        store.load().await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, 2);
        assert_eq!(snapshot[1].id, 1);
        assert!(store.status().await.error.is_none());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_prior_snapshot_and_raises_flag() {
        let service = Arc::new(MockMovieService::new());
        service.set_movies(vec![fixtures::movie(1, "Alpha", "Action")]).await;

        let store = CatalogStore::new(Arc::clone(&service) as Arc<dyn MovieService>);
        store.load().await.unwrap();

        service.fail_next(crate::remote::RemoteError::Api {
            status: 500,
            message: "boom".to_string(),
        })
        .await;

        let result = store.load().await;
        assert!(result.is_err());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1, "prior snapshot must be retained");

        let status = store.status().await;
        assert!(!status.loading);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn test_successful_load_clears_error_flag() {
        let service = Arc::new(MockMovieService::new());
        service.fail_next(crate::remote::RemoteError::Api {
            status: 503,
            message: "down".to_string(),
        })
        .await;

        let store = CatalogStore::new(Arc::clone(&service) as Arc<dyn MovieService>);
        assert!(store.load().await.is_err());
        assert!(store.status().await.error.is_some());

        service.set_movies(vec![fixtures::movie(1, "Alpha", "Action")]).await;
        store.load().await.unwrap();
        assert!(store.status().await.error.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_loads_issue_one_request() {
        let service = Arc::new(MockMovieService::new());
        service.set_movies(vec![fixtures::movie(1, "Alpha", "Action")]).await;
        service.set_latency(std::time::Duration::from_millis(50)).await;

        let store = Arc::new(CatalogStore::new(Arc::clone(&service) as Arc<dyn MovieService>));

        let a = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load().await }
        });
        let b = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load().await }
        });

        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let calls = service.recorded_calls().await;
        let fetches = calls
            .iter()
            .filter(|c| matches!(c, RecordedCall::ListMovies))
            .count();
        assert_eq!(fetches, 1, "concurrent loads must coalesce");
    }

    #[tokio::test]
    async fn test_load_emits_events() {
        let service = Arc::new(MockMovieService::new());
        service.set_movies(vec![fixtures::movie(1, "Alpha", "Action")]).await;

        let store = CatalogStore::new(Arc::clone(&service) as Arc<dyn MovieService>);
        let mut events = store.subscribe();

        store.load().await.unwrap();

        assert_eq!(events.recv().await.unwrap(), CatalogEvent::LoadStarted);
        assert_eq!(events.recv().await.unwrap(), CatalogEvent::Loaded { count: 1 });
    }
}
