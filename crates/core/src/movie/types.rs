//! Wire types for the remote movie catalog.
//!
//! Field names follow the remote service's JSON (snake_case, with the
//! poster field historically named `movie_poster`). Timestamps arrive as
//! ISO-8601 strings and may be absent; parse failures degrade to `None`
//! rather than failing deserialization.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Unique movie key within a catalog snapshot.
pub type MovieId = i64;

/// A movie entity from the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique id within a catalog snapshot.
    pub id: MovieId,
    /// Display title.
    pub title: String,
    /// Single genre tag.
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Poster image URL (wire name `movie_poster`).
    #[serde(rename = "movie_poster", default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Upload timestamp, ISO-8601 string or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Like count (only populated on the single-movie endpoint).
    #[serde(default)]
    pub likes: i64,
}

impl Movie {
    /// Parsed upload timestamp, `None` if absent or unparseable.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_created_at)
    }
}

/// A comment record attached to a movie. The engine only consumes the
/// count; records are passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub email: String,
    pub comment_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Parse an ISO-8601 timestamp from the remote service.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, with or without offset) and
/// the bare `YYYY-MM-DD HH:MM:SS` form some backends emit. Returns `None`
/// on anything else.
pub fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_deserialize_full_movie() {
        let json = r#"{
            "id": 7,
            "title": "The Dark Knight",
            "genre": "Action",
            "release_year": 2008,
            "description": "Gotham under siege.",
            "movie_poster": "https://cdn.example.com/tdk.jpg",
            "trailer_url": "https://cdn.example.com/tdk-trailer.mp4",
            "video_url": "https://cdn.example.com/tdk.mp4",
            "created_at": "2024-05-01T10:00:00.000Z",
            "likes": 42
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 7);
        assert_eq!(movie.genre, "Action");
        assert_eq!(movie.poster_url.as_deref(), Some("https://cdn.example.com/tdk.jpg"));
        assert!(movie.download_url.is_none());
        assert_eq!(movie.likes, 42);

        let created = movie.created_at_utc().unwrap();
        assert_eq!(created.year(), 2024);
    }

    #[test]
    fn test_deserialize_minimal_movie() {
        let json = r#"{"id": 1, "title": "Alpha", "genre": "Drama"}"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert!(movie.created_at.is_none());
        assert!(movie.created_at_utc().is_none());
        assert_eq!(movie.likes, 0);
    }

    #[test]
    fn test_parse_created_at_rfc3339() {
        assert!(parse_created_at("2024-05-01T10:00:00Z").is_some());
        assert!(parse_created_at("2024-05-01T10:00:00.123+02:00").is_some());
    }

    #[test]
    fn test_parse_created_at_sql_datetime() {
        assert!(parse_created_at("2024-05-01 10:00:00").is_some());
    }

    #[test]
    fn test_parse_created_at_garbage() {
        assert!(parse_created_at("not a timestamp").is_none());
        assert!(parse_created_at("").is_none());
    }

    #[test]
    fn test_poster_round_trips_under_wire_name() {
        let movie = Movie {
            id: 1,
            title: "Alpha".to_string(),
            genre: "Drama".to_string(),
            release_year: None,
            description: None,
            poster_url: Some("/p.jpg".to_string()),
            trailer_url: None,
            video_url: None,
            download_url: None,
            created_at: None,
            likes: 0,
        };

        let json = serde_json::to_string(&movie).unwrap();
        assert!(json.contains("movie_poster"));
        let back: Movie = serde_json::from_str(&json).unwrap();
        assert_eq!(back, movie);
    }
}
