//! Pintprice Server - happy hour pricing and Pick of the Day
//!
//! A Rust REST API server over a venue catalog snapshot.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pintprice_server::{api, config::AppConfig, repository::JsonFileCatalog, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pintprice_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Pintprice Server v{}", env!("CARGO_PKG_VERSION"));

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Catalog snapshot source
    let catalog = Arc::new(JsonFileCatalog::new(&config.catalog.path));
    tracing::info!("Reading venue catalog from {}", config.catalog.path);

    // Market clock misconfiguration is fatal
    let timezone = config.market.timezone.clone();
    let state = AppState::new(config, catalog)
        .with_context(|| format!("Invalid market timezone {}", timezone))?;

    tracing::info!("Market timezone {}", timezone);

    // Build router
    let app = api::router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().context("Invalid host address")?,
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
