//! HTTP client for the remote movie catalog service.
//!
//! Every request carries the service API key in the `x-api-key` header
//! when one is configured.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RemoteError;
use crate::movie::{Comment, Movie, MovieId};

/// Remote service client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the catalog service (e.g. "https://api.example.com").
    pub base_url: String,
    /// API key sent as `x-api-key` on every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

/// HTTP implementation of [`super::MovieService`].
pub struct HttpMovieService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpMovieService {
    /// Create a new client against the configured service.
    pub fn new(config: RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    async fn get_checked(&self, path: &str, resource: &str) -> Result<Response, RemoteError> {
        let response = self
            .with_key(self.client.get(self.endpoint(path)))
            .send()
            .await?;
        check_status(response, resource).await
    }

    async fn post_checked(&self, path: &str, resource: &str) -> Result<Response, RemoteError> {
        let response = self
            .with_key(self.client.post(self.endpoint(path)))
            .send()
            .await?;
        check_status(response, resource).await
    }
}

/// Map non-success statuses to [`RemoteError`] variants.
async fn check_status(response: Response, resource: &str) -> Result<Response, RemoteError> {
    let status = response.status();
    if status == 404 {
        return Err(RemoteError::NotFound(resource.to_string()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

#[async_trait::async_trait]
impl super::MovieService for HttpMovieService {
    async fn list_movies(&self) -> Result<Vec<Movie>, RemoteError> {
        debug!("Fetching full catalog");

        let response = self.get_checked("/movies", "catalog").await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse catalog response: {}", e)))
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, RemoteError> {
        debug!("Fetching movie: id={}", id);

        let response = self
            .get_checked(&format!("/movies/{}", id), &format!("movie {}", id))
            .await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse movie response: {}", e)))
    }

    async fn list_comments(&self, id: MovieId) -> Result<Vec<Comment>, RemoteError> {
        debug!("Fetching comments: movie={}", id);

        let response = self
            .get_checked(
                &format!("/movies/{}/comments", id),
                &format!("comments for movie {}", id),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse comments response: {}", e)))
    }

    async fn related_movies(&self, id: MovieId) -> Result<Vec<Movie>, RemoteError> {
        debug!("Fetching related movies: movie={}", id);

        let response = self
            .get_checked(
                &format!("/movies/{}/related", id),
                &format!("movies related to {}", id),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("Failed to parse related response: {}", e)))
    }

    async fn like(&self, id: MovieId) -> Result<(), RemoteError> {
        debug!("Posting like: movie={}", id);

        self.post_checked(&format!("/movies/{}/like", id), &format!("movie {}", id))
            .await?;
        Ok(())
    }

    async fn unlike(&self, id: MovieId) -> Result<(), RemoteError> {
        debug!("Posting unlike: movie={}", id);

        self.post_checked(&format!("/movies/{}/unlike", id), &format!("movie {}", id))
            .await?;
        Ok(())
    }
}
