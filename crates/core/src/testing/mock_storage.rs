//! Mock persistence collaborator for testing.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::favorites::{StateStorage, StorageError};

/// In-memory implementation of the [`StateStorage`] trait.
///
/// Supports seeding payloads (including corrupt ones), failing the next
/// write, and counting write-throughs.
pub struct MockStorage {
    entries: Mutex<HashMap<String, String>>,
    fail_next_write: AtomicBool,
    writes: AtomicUsize,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail_next_write: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    /// Seed a payload under a key, bypassing the write counter.
    pub fn seed(&self, key: &str, payload: &str) {
        self.entries
            .lock()
            .expect("mock storage lock")
            .insert(key.to_string(), payload.to_string());
    }

    /// Make the next write fail with an I/O error.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStorage for MockStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("mock storage lock")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::other("injected write failure")));
        }

        self.entries
            .lock()
            .expect("mock storage lock")
            .insert(key.to_string(), payload.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
