//! # State Module
//!
//! Shared state handed to every axum handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  Router::with_state(AppState)                                          │
//! │          │                                                              │
//! │          ├──────────────────┬──────────────────┬──────────────────┐     │
//! │          ▼                  ▼                  ▼                  ▼     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   Catalog    │  │  CartState   │  │  Storefront  │  │  Pricing   │  │
//! │  │              │  │              │  │  Config      │  │  Calculator│  │
//! │  │  RwLock<Vec< │  │  Mutex<Hash  │  │              │  │            │  │
//! │  │   Product>>  │  │   Map<Cart>> │  │  read-only   │  │  Copy      │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  Cloning AppState clones four handles, never the data behind them.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;

use std::sync::Arc;

use jobica_core::PricingCalculator;
use jobica_store::Catalog;

use crate::config::StorefrontConfig;

pub use cart::CartState;

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub carts: Arc<CartState>,
    pub config: Arc<StorefrontConfig>,
    pub calculator: PricingCalculator,
}

impl AppState {
    /// Assembles the state. The pricing policy comes from the config.
    pub fn new(catalog: Catalog, config: StorefrontConfig) -> Self {
        AppState {
            catalog,
            carts: Arc::new(CartState::with_limits(
                config.cart_idle_timeout(),
                config.max_carts,
            )),
            calculator: PricingCalculator::new(config.pricing_policy()),
            config: Arc::new(config),
        }
    }
}
