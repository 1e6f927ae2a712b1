//! Persistence collaborator for client-local state.
//!
//! Modeled on a browser's key/value storage: one fixed key maps to one
//! serialized payload, read once at startup and rewritten whole on every
//! mutation.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The fixed storage key for the favorites payload.
pub const FAVORITES_KEY: &str = "favoriteMovies";

/// Errors from the persistence collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Key/value persistence contract for client-local state.
pub trait StateStorage: Send + Sync {
    /// Read the payload under `key`, `None` if the key has never been
    /// written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the payload under `key`.
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed storage: each key is a JSON file under one
/// directory. Writes go to a temp file first and are renamed into place
/// so a crash mid-write never leaves a truncated payload.
pub struct FsStorage {
    dir: PathBuf,
}

impl FsStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStorage for FsStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.key_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
