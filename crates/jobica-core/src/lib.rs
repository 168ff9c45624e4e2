//! # jobica-core: Pure Business Logic for the JOBICA FOODS Storefront
//!
//! This crate holds every business rule of the shop as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     JOBICA Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (catalog + admin)                    │   │
//! │  │    Search ──► Product detail ──► Cart ──► "Order via WhatsApp"  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (axum)                       │   │
//! │  │    /api/products, /api/carts, /api/pricing/quote, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ jobica-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │ pricing │ │  cart   │ │  order  │ │catalog  │  │   │
//! │  │   │  Money  │ │ tiers   │ │ Cart    │ │ wa.me   │ │ search  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 jobica-store (Catalog Layer)                    │   │
//! │  │                 products.json load / rewrite                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductUnit, ProductInput)
//! - [`money`] - Money type with integer kobo arithmetic
//! - [`pricing`] - Row / half-row / flat tiered pricing
//! - [`cart`] - Shopping cart and line items
//! - [`catalog`] - Search and filters for the product list
//! - [`order`] - WhatsApp order slips and inquiry links
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use jobica_core::{Money, PricingCalculator, PricingConfig};
//!
//! let calc = PricingCalculator::default();
//! let pricing = PricingConfig::flat(Money::from_naira(150))
//!     .with_half_row(Money::from_naira(400));
//!
//! // One half row of 3 plus a loose unit
//! let subtotal = calc.subtotal(&pricing, "Tasty Tom Sachet", 4).unwrap();
//! assert_eq!(subtotal.to_string(), "₦550");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals, LineItem};
pub use catalog::CatalogQuery;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{ContactLink, OrderMessage};
pub use pricing::{PriceBreakdown, PricingCalculator, PricingConfig, PricingPolicy, PricingTier};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in a cart.
///
/// ## Business Reason
/// Catches typos like 1000 instead of 10 before they reach the order slip.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest price accepted for any product price field (₦1,000,000,000).
///
/// A full cart at this price, [`MAX_CART_ITEMS`] lines of
/// [`MAX_ITEM_QUANTITY`] units, still fits in an `i64` kobo total.
pub const MAX_PRICE_KOBO: i64 = 100_000_000_000;

/// Generates a new product id.
pub fn generate_product_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
