//! The favorites store.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use super::storage::{StateStorage, StorageError, FAVORITES_KEY};
use crate::movie::{Movie, MovieId};

/// Current persisted payload format version.
const FORMAT_VERSION: u32 = 1;

/// Buffer size for favorites change events.
const EVENT_BUFFER_SIZE: usize = 16;

/// Errors surfaced by favorites mutations.
///
/// Only write-through failures are surfaced; load-time problems are
/// recovered to an empty set and never escape [`FavoritesStore::open`].
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// Persisting the set failed. The in-memory mutation is kept; the
    /// next successful write persists the whole set again.
    #[error("failed to persist favorites: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the set failed.
    #[error("failed to serialize favorites: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Change notifications emitted by the favorites store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesEvent {
    Added { id: MovieId },
    Removed { id: MovieId },
}

/// Persisted payload: a versioned envelope around the snapshot list.
///
/// Older releases wrote a bare JSON array; `parse_payload` still accepts
/// that form so pre-existing payloads load and are upgraded on the next
/// write.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedFavorites {
    version: u32,
    movies: Vec<Movie>,
}

struct Inner {
    /// Favorited snapshots in insertion order.
    entries: Vec<Movie>,
    /// Membership index; favorites are identified by id only.
    ids: HashSet<MovieId>,
}

/// User-curated set of movie snapshots, persisted write-through under one
/// fixed storage key.
pub struct FavoritesStore {
    storage: Arc<dyn StateStorage>,
    inner: RwLock<Inner>,
    events: broadcast::Sender<FavoritesEvent>,
}

impl FavoritesStore {
    /// Load the persisted set once. Absence, unreadable storage, or a
    /// corrupt payload all degrade to an empty set - nothing escapes.
    pub fn open(storage: Arc<dyn StateStorage>) -> Self {
        let entries = match storage.read(FAVORITES_KEY) {
            Ok(Some(payload)) => match parse_payload(&payload) {
                Some(movies) => movies,
                None => {
                    warn!("Corrupt favorites payload, starting with an empty set");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favorites, starting with an empty set: {}", e);
                Vec::new()
            }
        };

        info!("Favorites loaded: {} entries", entries.len());

        let ids = entries.iter().map(|m| m.id).collect();
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);

        Self {
            storage,
            inner: RwLock::new(Inner { entries, ids }),
            events,
        }
    }

    /// Subscribe to favorites change events.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesEvent> {
        self.events.subscribe()
    }

    /// Membership test by id.
    pub async fn is_favorite(&self, id: MovieId) -> bool {
        self.inner.read().await.ids.contains(&id)
    }

    /// Favorites in insertion order. A re-added movie sits at the end,
    /// not in its original position.
    pub async fn list(&self) -> Vec<Movie> {
        self.inner.read().await.entries.clone()
    }

    /// Number of favorites.
    pub async fn count(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    /// Add the movie if absent, remove it if present; persist the full
    /// set either way. Returns whether the movie is a favorite afterward.
    pub async fn toggle(&self, movie: &Movie) -> Result<bool, FavoritesError> {
        let mut inner = self.inner.write().await;

        let now_favorite = if inner.ids.remove(&movie.id) {
            inner.entries.retain(|m| m.id != movie.id);
            false
        } else {
            inner.ids.insert(movie.id);
            inner.entries.push(movie.clone());
            true
        };

        let persist_result = self.persist(&inner.entries);
        drop(inner);

        if let Err(e) = &persist_result {
            warn!("Favorites write-through failed: {}", e);
        }

        let event = if now_favorite {
            FavoritesEvent::Added { id: movie.id }
        } else {
            FavoritesEvent::Removed { id: movie.id }
        };
        let _ = self.events.send(event);

        persist_result.map(|_| now_favorite)
    }

    fn persist(&self, entries: &[Movie]) -> Result<(), FavoritesError> {
        let payload = serde_json::to_string(&PersistedFavorites {
            version: FORMAT_VERSION,
            movies: entries.to_vec(),
        })?;
        self.storage.write(FAVORITES_KEY, &payload)?;
        Ok(())
    }
}

fn parse_payload(payload: &str) -> Option<Vec<Movie>> {
    if let Ok(envelope) = serde_json::from_str::<PersistedFavorites>(payload) {
        return Some(envelope.movies);
    }
    // Pre-versioning payloads were a bare array of snapshots.
    serde_json::from_str::<Vec<Movie>>(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockStorage};

    fn store_with(storage: Arc<MockStorage>) -> FavoritesStore {
        FavoritesStore::open(storage as Arc<dyn StateStorage>)
    }

    #[tokio::test]
    async fn test_starts_empty_without_payload() {
        let store = store_with(Arc::new(MockStorage::new()));
        assert_eq!(store.count().await, 0);
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = store_with(Arc::new(MockStorage::new()));
        let movie = fixtures::movie(1, "Alpha", "Action");

        assert!(store.toggle(&movie).await.unwrap());
        assert!(store.is_favorite(1).await);
        assert_eq!(store.count().await, 1);

        assert!(!store.toggle(&movie).await.unwrap());
        assert!(!store.is_favorite(1).await);
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_toggle_twice_is_identity() {
        let store = store_with(Arc::new(MockStorage::new()));
        let kept = fixtures::movie(1, "Alpha", "Action");
        let toggled = fixtures::movie(2, "Beta", "Drama");

        store.toggle(&kept).await.unwrap();
        let before = store.list().await;

        store.toggle(&toggled).await.unwrap();
        store.toggle(&toggled).await.unwrap();

        assert_eq!(store.list().await, before);
        assert!(!store.is_favorite(2).await);
    }

    #[tokio::test]
    async fn test_re_added_favorite_moves_to_end() {
        let store = store_with(Arc::new(MockStorage::new()));
        let first = fixtures::movie(1, "Alpha", "Action");
        let second = fixtures::movie(2, "Beta", "Drama");

        store.toggle(&first).await.unwrap();
        store.toggle(&second).await.unwrap();
        store.toggle(&first).await.unwrap(); // remove
        store.toggle(&first).await.unwrap(); // re-add

        let ids: Vec<i64> = store.list().await.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_every_mutation_writes_through() {
        let storage = Arc::new(MockStorage::new());
        let store = store_with(Arc::clone(&storage));
        let movie = fixtures::movie(1, "Alpha", "Action");

        store.toggle(&movie).await.unwrap();
        store.toggle(&movie).await.unwrap();

        assert_eq!(storage.write_count(), 2);
    }

    #[tokio::test]
    async fn test_round_trip_through_storage() {
        let storage = Arc::new(MockStorage::new());
        let movie = fixtures::movie(1, "Alpha", "Action");

        {
            let store = store_with(Arc::clone(&storage));
            store.toggle(&movie).await.unwrap();
        }

        let reloaded = store_with(storage);
        let listed = reloaded.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], movie);
        assert!(reloaded.is_favorite(1).await);
    }

    #[tokio::test]
    async fn test_corrupt_payload_degrades_to_empty() {
        let storage = Arc::new(MockStorage::new());
        storage.seed(FAVORITES_KEY, "definitely-not-json{{{");

        let store = store_with(storage);
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_accepts_legacy_bare_array_payload() {
        let storage = Arc::new(MockStorage::new());
        let legacy = serde_json::to_string(&vec![fixtures::movie(9, "Legacy", "Drama")]).unwrap();
        storage.seed(FAVORITES_KEY, &legacy);

        let store = store_with(Arc::clone(&storage));
        assert!(store.is_favorite(9).await);

        // Next write upgrades to the versioned envelope.
        store.toggle(&fixtures::movie(1, "Alpha", "Action")).await.unwrap();
        let payload = storage.read(FAVORITES_KEY).unwrap().unwrap();
        assert!(payload.contains("\"version\":1"));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_state() {
        let storage = Arc::new(MockStorage::new());
        let store = store_with(Arc::clone(&storage));
        let movie = fixtures::movie(1, "Alpha", "Action");

        storage.fail_next_write();
        assert!(store.toggle(&movie).await.is_err());
        assert!(store.is_favorite(1).await, "memory state survives a failed write");
    }

    #[tokio::test]
    async fn test_toggle_emits_events() {
        let store = store_with(Arc::new(MockStorage::new()));
        let mut events = store.subscribe();
        let movie = fixtures::movie(1, "Alpha", "Action");

        store.toggle(&movie).await.unwrap();
        store.toggle(&movie).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), FavoritesEvent::Added { id: 1 });
        assert_eq!(events.recv().await.unwrap(), FavoritesEvent::Removed { id: 1 });
    }
}
