//! Locally persisted favorites.
//!
//! A favorite is a full snapshot of a movie taken when the user starred
//! it - membership is by id, and content divergence from the live catalog
//! is tolerated by design (the set is a cache, not a live reference).
//! Every mutation is written through to the persistence collaborator;
//! a missing or corrupt payload degrades to an empty set.

mod storage;
mod store;

pub use storage::{FsStorage, StateStorage, StorageError, FAVORITES_KEY};
pub use store::{FavoritesError, FavoritesEvent, FavoritesStore};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for favorites persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Directory holding the persisted state files (default: "data").
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}
