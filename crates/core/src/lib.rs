//! marquee-core - the data and state engine behind a movie catalog
//! browsing client.
//!
//! The engine owns catalog loading, derived-view computation (search,
//! genre grouping, recency ranking), a persisted favorites set, the
//! recency-label clock, and per-row auto-scroll state machines. It
//! consumes two external contracts: a fetch collaborator
//! ([`remote::MovieService`]) and a persistence collaborator
//! ([`favorites::StateStorage`]). Rendering, routing, and the admin CRUD
//! surface live outside this crate.

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod movie;
pub mod recency;
pub mod remote;
pub mod rows;
pub mod testing;
pub mod views;

pub use catalog::{CatalogError, CatalogEvent, CatalogStatus, CatalogStore};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use favorites::{
    FavoritesConfig, FavoritesError, FavoritesEvent, FavoritesStore, FsStorage, StateStorage,
};
pub use movie::{Comment, Movie, MovieId};
pub use recency::{elapsed_label, RecencyClock, RecencyConfig};
pub use remote::{HttpMovieService, MovieService, RemoteConfig, RemoteError};
pub use rows::{AutoScrollConfig, AutoScrollController, Direction, RowState};
pub use views::{compute, DerivedView, GenreBucket, ViewConfig};
