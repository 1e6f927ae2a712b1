//! Headless shell around the marquee engine.
//!
//! Wires the stores and clocks together, performs the initial catalog
//! load, and runs until Ctrl+C. A real presentation layer would subscribe
//! to the same stores; this shell just logs what it observes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_core::{
    compute, load_config, validate_config, AutoScrollController, CatalogStore, FavoritesStore,
    FsStorage, HttpMovieService, MovieService, RecencyClock, SanitizedConfig, StateStorage,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MARQUEE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("marquee {} starting", VERSION);
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog service: {}", config.remote.base_url);
    info!(
        "Config: {}",
        serde_json_compact(&SanitizedConfig::from(&config))
    );

    // Favorites, loaded once from local storage
    let storage: Arc<dyn StateStorage> = Arc::new(FsStorage::new(config.favorites.dir.clone()));
    let favorites = Arc::new(FavoritesStore::open(storage));
    info!("Favorites: {} entries", favorites.count().await);

    // Catalog store over the HTTP service
    let service: Arc<dyn MovieService> = Arc::new(
        HttpMovieService::new(config.remote.clone())
            .context("Failed to create catalog service client")?,
    );
    let catalog = Arc::new(CatalogStore::new(service));

    // Initial load is fail-soft: on error we keep the empty snapshot and
    // surface the flag, exactly as a view would render it.
    if let Err(e) = catalog.load().await {
        warn!("Initial catalog load failed ({}); retry is a user action", e);
    }

    let snapshot = catalog.snapshot().await;
    let view = compute(&snapshot, "", &config.views);
    info!(
        "Catalog: {} movies, {} genres, {} in the recent row",
        view.filtered.len(),
        view.genre_buckets.len(),
        view.recent.len()
    );

    // Recency clock over the catalog
    let clock = RecencyClock::new(Arc::clone(&catalog), config.recency.clone());
    clock.start().await;

    // One auto-scrolling row for the recent rail, as the presentation
    // layer would mount it
    let extent = (view.recent.len() as u32).saturating_mul(config.rows.step);
    let recent_row = AutoScrollController::new(config.rows.clone(), extent);
    recent_row.mount();

    info!("Engine running; press Ctrl+C to stop");
    shutdown_signal().await;

    // Deterministic teardown: no timer survives shutdown
    recent_row.unmount();
    clock.stop();
    info!("Shut down cleanly");

    Ok(())
}

fn serde_json_compact(config: &SanitizedConfig) -> String {
    serde_json::to_string(config).unwrap_or_else(|_| "<unserializable>".to_string())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
