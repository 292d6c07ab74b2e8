use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_hub::{
    api::{create_router, AppState, ViewSettings},
    config::{Config, StorageBackend},
    db::{FileStorage, KeyValueStore, MemoryStorage},
    services::{
        ingest_catalog,
        providers::{CatalogSource, HttpCatalogSource},
    },
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let storage: Arc<dyn KeyValueStore> = match config.storage_backend {
        StorageBackend::File => Arc::new(
            FileStorage::open(&config.storage_dir)
                .with_context(|| format!("Failed to open storage at {}", config.storage_dir))?,
        ),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };

    let state = AppState::new(storage, ViewSettings::from(&config));

    // The catalog is loaded once before serving; failures leave it empty.
    let source = HttpCatalogSource::new(
        config.catalog_url.clone(),
        config.catalog_timeout_secs.map(Duration::from_secs),
    )?;
    tracing::info!(source = source.name(), url = %source.url(), "Loading movies");
    ingest_catalog(&source, &state.catalog).await;

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app).await?;
    Ok(())
}
