//! SNT Budgeting API Server
//!
//! Main entry point for the malaria budgeting service.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use snt_api::{AppState, create_router};
use snt_data::{CachedDatasetProvider, CsvDatasetProvider};
use snt_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snt=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    if !config.data.root.is_dir() {
        warn!(
            root = %config.data.root.display(),
            "Dataset root does not exist; every country will be unknown"
        );
    }

    // Reference datasets, cached per country
    let datasets = CachedDatasetProvider::from_config(
        CsvDatasetProvider::new(config.data.root.clone()),
        &config.data,
    );
    info!(
        root = %config.data.root.display(),
        cache_capacity = config.data.cache_capacity,
        cache_ttl_secs = config.data.cache_ttl_secs,
        "Dataset provider configured"
    );

    // Create router
    let app = create_router(AppState::new(datasets));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
