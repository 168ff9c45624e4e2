//! # JOBICA Storefront Library
//!
//! The REST API behind the JOBICA FOODS shop: catalog browsing, tiered
//! quantity pricing, carts and the WhatsApp checkout.
//!
//! ## Module Organization
//! ```text
//! jobica_storefront/
//! ├── lib.rs          ◄─── You are here (router assembly & logging)
//! ├── main.rs         ◄─── Binary: config, bind, serve, shutdown
//! ├── config.rs       ◄─── JOBICA_* environment configuration
//! ├── error.rs        ◄─── API error type for handlers
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (catalog, carts, config, calculator)
//! │   └── cart.rs     ◄─── Cart sessions
//! └── routes/
//!     ├── mod.rs      ◄─── Route table
//!     ├── products.rs ◄─── Product list/detail/CRUD
//!     ├── catalog.rs  ◄─── Metadata and image URLs
//!     ├── pricing.rs  ◄─── Quantity quotes
//!     ├── carts.rs    ◄─── Cart lines and checkout
//!     └── contact.rs  ◄─── "Chat with us" link
//! ```
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser ──► CorsLayer ──► TraceLayer ──► Router ──► handler           │
//! │                                                        │                │
//! │                         State<AppState> ◄──────────────┘                │
//! │                               │                                         │
//! │            ┌──────────────────┼──────────────────┐                      │
//! │            ▼                  ▼                  ▼                      │
//! │     Catalog (store)    CartState (mutex)   PricingCalculator (core)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,jobica=debug,tower_http=info";

/// Builds the application with all routes and middleware.
///
/// ## Example
/// ```rust,ignore
/// let catalog = Catalog::open(CatalogConfig::in_memory()).await?;
/// let app = build_app(AppState::new(catalog, StorefrontConfig::in_memory()));
/// axum::serve(listener, app).await?;
/// ```
pub fn build_app(state: AppState) -> Router {
    // The shop page is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
