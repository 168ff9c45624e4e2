//! # HTTP Routes
//!
//! ## Route Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Route Modules                                   │
//! │                                                                         │
//! │  products.rs ──── list, detail, create, update, delete                 │
//! │  catalog.rs ───── dropdown metadata, image URL assignment              │
//! │  pricing.rs ───── quantity quotes                                      │
//! │  carts.rs ─────── cart sessions, line edits, checkout                  │
//! │  contact.rs ───── "Chat with us" link                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod carts;
pub mod catalog;
pub mod contact;
pub mod pricing;
pub mod products;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// All API routes, without middleware.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/catalog/meta", get(catalog::meta))
        .route("/api/upload", post(catalog::upload))
        .route("/api/pricing/quote", post(pricing::quote))
        .route("/api/contact", get(contact::contact))
        .route("/api/carts", post(carts::create_cart))
        .route(
            "/api/carts/{cart}",
            get(carts::get_cart).delete(carts::delete_cart),
        )
        .route("/api/carts/{cart}/items", post(carts::add_item))
        .route(
            "/api/carts/{cart}/items/{product}",
            put(carts::update_item).delete(carts::remove_item),
        )
        .route("/api/carts/{cart}/clear", post(carts::clear_cart))
        .route("/api/carts/{cart}/checkout", post(carts::checkout))
}

async fn health() -> &'static str {
    "OK"
}
