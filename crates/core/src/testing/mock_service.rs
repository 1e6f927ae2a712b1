//! Mock movie service for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::movie::{Comment, Movie, MovieId};
use crate::remote::{MovieService, RemoteError};

/// A recorded service call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListMovies,
    GetMovie(MovieId),
    ListComments(MovieId),
    RelatedMovies(MovieId),
    Like(MovieId),
    Unlike(MovieId),
}

/// Mock implementation of the [`MovieService`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable catalogs, comments, and related lists
/// - Track calls for assertions
/// - Simulate failures and latency
///
/// # Example
///
/// ```rust,ignore
/// use marquee_core::testing::{fixtures, MockMovieService};
///
/// let service = MockMovieService::new();
/// service.set_movies(vec![fixtures::movie(1, "Alpha", "Action")]).await;
///
/// let movies = service.list_movies().await?;
/// assert_eq!(movies.len(), 1);
///
/// let calls = service.recorded_calls().await;
/// assert_eq!(calls.len(), 1);
/// ```
pub struct MockMovieService {
    /// Configured catalog to return.
    movies: Arc<RwLock<Vec<Movie>>>,
    /// Configured comments per movie id.
    comments: Arc<RwLock<HashMap<MovieId, Vec<Comment>>>>,
    /// Configured related movies per movie id.
    related: Arc<RwLock<HashMap<MovieId, Vec<Movie>>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<RemoteError>>>,
    /// Simulated per-call latency.
    latency: Arc<RwLock<Option<Duration>>>,
}

impl MockMovieService {
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(Vec::new())),
            comments: Arc::new(RwLock::new(HashMap::new())),
            related: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            latency: Arc::new(RwLock::new(None)),
        }
    }

    /// Configure the catalog returned by `list_movies`.
    pub async fn set_movies(&self, movies: Vec<Movie>) {
        *self.movies.write().await = movies;
    }

    /// Configure the comments returned for a movie.
    pub async fn set_comments(&self, id: MovieId, comments: Vec<Comment>) {
        self.comments.write().await.insert(id, comments);
    }

    /// Configure the related list returned for a movie.
    pub async fn set_related(&self, id: MovieId, movies: Vec<Movie>) {
        self.related.write().await.insert(id, movies);
    }

    /// Make the next call fail with the given error.
    pub async fn fail_next(&self, error: RemoteError) {
        *self.next_error.write().await = Some(error);
    }

    /// Add latency to every call.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// All calls made so far, in order.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: RecordedCall) -> Result<(), RemoteError> {
        self.calls.write().await.push(call);

        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MockMovieService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieService for MockMovieService {
    async fn list_movies(&self) -> Result<Vec<Movie>, RemoteError> {
        self.record(RecordedCall::ListMovies).await?;
        Ok(self.movies.read().await.clone())
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, RemoteError> {
        self.record(RecordedCall::GetMovie(id)).await?;
        self.movies
            .read()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("movie {}", id)))
    }

    async fn list_comments(&self, id: MovieId) -> Result<Vec<Comment>, RemoteError> {
        self.record(RecordedCall::ListComments(id)).await?;
        Ok(self.comments.read().await.get(&id).cloned().unwrap_or_default())
    }

    async fn related_movies(&self, id: MovieId) -> Result<Vec<Movie>, RemoteError> {
        self.record(RecordedCall::RelatedMovies(id)).await?;
        Ok(self.related.read().await.get(&id).cloned().unwrap_or_default())
    }

    async fn like(&self, id: MovieId) -> Result<(), RemoteError> {
        self.record(RecordedCall::Like(id)).await
    }

    async fn unlike(&self, id: MovieId) -> Result<(), RemoteError> {
        self.record(RecordedCall::Unlike(id)).await
    }
}
