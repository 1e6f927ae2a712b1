//! Movie domain entities as served by the remote catalog service.

mod types;

pub use types::{parse_created_at, Comment, Movie, MovieId};
