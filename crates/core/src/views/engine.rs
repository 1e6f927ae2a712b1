//! The derived view engine.

use std::cmp::Ordering;

use super::types::{DerivedView, GenreBucket, ViewConfig};
use crate::movie::Movie;

/// Compute every derived view from one catalog snapshot and one search
/// term.
///
/// - `filtered`: case-insensitive substring match of the term against the
///   title; an empty term matches everything.
/// - `genre_buckets`: `filtered` grouped by genre. Bucket order is the
///   genre's first occurrence in the snapshot; movies keep snapshot order
///   within their bucket, so the buckets partition `filtered`.
/// - `recent`: `filtered` stable-sorted by descending upload time (movies
///   without a timestamp sort last), capped at `recent_limit`.
/// - `suggestions`: the first `suggestion_limit` entries of `filtered`.
pub fn compute(catalog: &[Movie], search_term: &str, config: &ViewConfig) -> DerivedView {
    let needle = search_term.to_lowercase();

    let filtered: Vec<Movie> = catalog
        .iter()
        .filter(|movie| needle.is_empty() || movie.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    let mut genre_buckets: Vec<GenreBucket> = Vec::new();
    for movie in &filtered {
        match genre_buckets.iter_mut().find(|b| b.genre == movie.genre) {
            Some(bucket) => bucket.movies.push(movie.clone()),
            None => genre_buckets.push(GenreBucket {
                genre: movie.genre.clone(),
                movies: vec![movie.clone()],
            }),
        }
    }

    let mut recent = filtered.clone();
    // Stable sort: equal timestamps keep snapshot order.
    recent.sort_by(descending_by_created_at);
    recent.truncate(config.recent_limit);

    let suggestions: Vec<Movie> = filtered
        .iter()
        .take(config.suggestion_limit)
        .cloned()
        .collect();

    DerivedView {
        filtered,
        genre_buckets,
        recent,
        suggestions,
    }
}

/// Newest first; movies with no parseable timestamp after all dated ones.
fn descending_by_created_at(a: &Movie, b: &Movie) -> Ordering {
    match (a.created_at_utc(), b.created_at_utc()) {
        (Some(a_time), Some(b_time)) => b_time.cmp(&a_time),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
