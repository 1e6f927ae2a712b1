//! Types for the catalog store.

use thiserror::Error;

/// Errors surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog fetch failed. The prior snapshot is retained.
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
}

/// Observable load status of the catalog store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStatus {
    /// A load request is in flight.
    pub loading: bool,
    /// The last load failed with this message; cleared on success.
    pub error: Option<String>,
}

/// Change notifications emitted by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    /// A load request was issued.
    LoadStarted,
    /// The snapshot was replaced with `count` movies.
    Loaded { count: usize },
    /// The load failed; the prior snapshot is still in place.
    LoadFailed { message: String },
}
