//! # JOBICA Storefront Server
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load JOBICA_* configuration ──► ConfigError names the bad variable │
//! │  2. Initialize logging           ──► RUST_LOG or the default filter    │
//! │  3. Open the catalog             ──► products.json (missing = empty)   │
//! │  4. Bind and serve               ──► axum on JOBICA_HOST:JOBICA_PORT   │
//! │  5. Ctrl+C / SIGTERM             ──► drain requests, exit              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use jobica_store::{Catalog, CatalogConfig};
use jobica_storefront::{build_app, init_tracing, AppState, StorefrontConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::load()?;
    init_tracing();

    info!("Starting JOBICA FOODS storefront");
    info!(
        store = %config.store_name,
        policy = ?config.pricing_policy(),
        catalog = ?config.catalog_path,
        "Configuration loaded"
    );

    let catalog_config = match &config.catalog_path {
        Some(path) => CatalogConfig::new(path),
        None => CatalogConfig::in_memory(),
    };
    let catalog = Catalog::open(catalog_config)
        .await
        .context("Failed to open the product catalog")?;

    let addr = config.socket_addr();
    let app = build_app(AppState::new(catalog, config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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

    info!("Shutdown signal received, finishing in-flight requests");
}
