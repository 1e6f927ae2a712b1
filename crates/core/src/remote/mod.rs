//! Remote movie catalog service client.
//!
//! The engine consumes the catalog through the [`MovieService`] trait so
//! the HTTP collaborator can be swapped for a mock in tests. Admin
//! mutation endpoints (create/edit/delete, poster upload) are external
//! CRUD and deliberately absent.

mod http;

pub use http::{HttpMovieService, RemoteConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::movie::{Comment, Movie, MovieId};

/// Errors that can occur when talking to the remote catalog service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP request failed (connect, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Service returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to decode a response body.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Fetch contract for the remote movie catalog.
#[async_trait]
pub trait MovieService: Send + Sync {
    /// Fetch the full catalog (`GET /movies`).
    async fn list_movies(&self) -> Result<Vec<Movie>, RemoteError>;

    /// Fetch a single movie including its like count (`GET /movies/{id}`).
    async fn get_movie(&self, id: MovieId) -> Result<Movie, RemoteError>;

    /// Fetch the comments for a movie (`GET /movies/{id}/comments`).
    async fn list_comments(&self, id: MovieId) -> Result<Vec<Comment>, RemoteError>;

    /// Fetch movies related to the given one (`GET /movies/{id}/related`).
    async fn related_movies(&self, id: MovieId) -> Result<Vec<Movie>, RemoteError>;

    /// Register a like (`POST /movies/{id}/like`).
    async fn like(&self, id: MovieId) -> Result<(), RemoteError>;

    /// Withdraw a like (`POST /movies/{id}/unlike`).
    async fn unlike(&self, id: MovieId) -> Result<(), RemoteError>;
}
