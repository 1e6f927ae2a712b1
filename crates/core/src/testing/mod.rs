//! Testing utilities and mock implementations of the external
//! collaborators (fetch contract and persistence contract), allowing the
//! whole engine to be exercised without a network or a filesystem.

mod mock_service;
mod mock_storage;

pub use mock_service::{MockMovieService, RecordedCall};
pub use mock_storage::MockStorage;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, SecondsFormat, Utc};

    use crate::movie::{Comment, Movie, MovieId};

    /// Create a test movie with reasonable defaults and no upload
    /// timestamp.
    pub fn movie(id: MovieId, title: &str, genre: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genre: genre.to_string(),
            release_year: Some(2020),
            description: Some(format!("A movie called {}.", title)),
            poster_url: Some(format!("https://cdn.example.com/{}.jpg", id)),
            trailer_url: None,
            video_url: Some(format!("https://cdn.example.com/{}.mp4", id)),
            download_url: None,
            created_at: None,
            likes: 0,
        }
    }

    /// Create a test movie uploaded at the given instant.
    pub fn movie_uploaded(
        id: MovieId,
        title: &str,
        genre: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Movie {
        Movie {
            created_at: Some(uploaded_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ..movie(id, title, genre)
        }
    }

    /// Create a test comment.
    pub fn comment(id: i64, email: &str, text: &str) -> Comment {
        Comment {
            id,
            email: email.to_string(),
            comment_text: text.to_string(),
            created_at: None,
        }
    }
}
