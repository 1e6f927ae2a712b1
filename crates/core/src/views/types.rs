//! Types for derived views.

use serde::{Deserialize, Serialize};

use crate::movie::Movie;

/// Configuration for derived view sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Cap on the recency-ranked row (default: 15).
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Movies shown in a collapsed genre row (default: 7).
    #[serde(default = "default_genre_preview_limit")]
    pub genre_preview_limit: usize,

    /// Entries offered for search autocomplete (default: 7).
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

fn default_recent_limit() -> usize {
    15
}

fn default_genre_preview_limit() -> usize {
    7
}

fn default_suggestion_limit() -> usize {
    7
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            genre_preview_limit: default_genre_preview_limit(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

/// One genre's slice of the filtered catalog, in snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreBucket {
    pub genre: String,
    pub movies: Vec<Movie>,
}

impl GenreBucket {
    /// The collapsed-row slice: the first `limit` movies of the bucket.
    pub fn preview(&self, limit: usize) -> &[Movie] {
        &self.movies[..self.movies.len().min(limit)]
    }
}

/// The ephemeral view set computed from one catalog snapshot and one
/// search term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedView {
    /// Movies whose title matches the active search term.
    pub filtered: Vec<Movie>,
    /// `filtered` partitioned by genre, buckets in first-seen order.
    pub genre_buckets: Vec<GenreBucket>,
    /// `filtered` ordered by descending upload time, capped.
    pub recent: Vec<Movie>,
    /// The first few filtered entries, for incremental search display.
    pub suggestions: Vec<Movie>,
}

impl DerivedView {
    /// Look up a bucket by genre tag.
    pub fn bucket(&self, genre: &str) -> Option<&GenreBucket> {
        self.genre_buckets.iter().find(|b| b.genre == genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_config_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.recent_limit, 15);
        assert_eq!(config.genre_preview_limit, 7);
        assert_eq!(config.suggestion_limit, 7);
    }

    #[test]
    fn test_view_config_deserialize_partial() {
        let config: ViewConfig = toml::from_str("recent_limit = 10").unwrap();
        assert_eq!(config.recent_limit, 10);
        assert_eq!(config.suggestion_limit, 7);
    }

    #[test]
    fn test_preview_shorter_than_limit() {
        let bucket = GenreBucket {
            genre: "Action".to_string(),
            movies: vec![],
        };
        assert!(bucket.preview(7).is_empty());
    }

    #[test]
    fn test_preview_slices_collapsed_row() {
        let bucket = GenreBucket {
            genre: "Action".to_string(),
            movies: (0..10)
                .map(|i| crate::testing::fixtures::movie(i, &format!("Movie {}", i), "Action"))
                .collect(),
        };

        let config = ViewConfig::default();
        let collapsed = bucket.preview(config.genre_preview_limit);
        assert_eq!(collapsed.len(), 7);
        assert_eq!(collapsed[0].id, 0);

        // Expanded rows show the whole bucket.
        assert_eq!(bucket.preview(usize::MAX).len(), 10);
    }
}
