//! Derived view computation over a catalog snapshot.
//!
//! Everything here is pure: given the catalog and the active search term,
//! [`compute`] produces the filtered list, genre buckets, the recency
//! ranking, and search suggestions in one shot. Views are never stored -
//! they are recomputed whenever either input changes, so a view can never
//! mix part-old and part-new inputs.

mod engine;
mod types;

pub use engine::compute;
pub use types::{DerivedView, GenreBucket, ViewConfig};
