//! # Cart Endpoints
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Workflow                               │
//! │                                                                         │
//! │  POST /api/carts                         → { cartId, items: [] }       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/carts/{cart}/items            (repeat per product)          │
//! │  PUT  /api/carts/{cart}/items/{product}  (quantity stepper)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /api/carts/{cart}/checkout         → { message, url }            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Browser opens https://wa.me/2347065096131?text=Hello%20JOBICA...      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout leaves the cart as it is; the shopper may come back and send
//! the order again.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use jobica_core::validation::{validate_product_id, validate_quantity};
use jobica_core::{Cart, CartTotals, CoreResult, LineItem, OrderMessage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: String,
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    /// "₦4,350"
    pub total_text: String,
}

impl CartResponse {
    fn new(state: &AppState, cart_id: &str, cart: &Cart) -> Self {
        let totals = CartTotals::from(cart);
        CartResponse {
            cart_id: cart_id.to_string(),
            items: cart.items().to_vec(),
            total_text: state.config.format_currency(totals.total),
            totals,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub order: OrderMessage,
    pub total_text: String,
    /// Deep-link that opens the order in WhatsApp.
    pub url: String,
}

fn cart_not_found(cart_id: &str) -> ApiError {
    ApiError::not_found("Cart", cart_id)
}

/// Runs a cart mutation and renders the cart afterwards.
fn mutate<F>(state: &AppState, cart_id: &str, f: F) -> ApiResult<CartResponse>
where
    F: FnOnce(&mut Cart) -> CoreResult<()>,
{
    state
        .carts
        .with_cart_mut(cart_id, |cart| -> CoreResult<CartResponse> {
            f(cart)?;
            Ok(CartResponse::new(state, cart_id, cart))
        })
        .ok_or_else(|| cart_not_found(cart_id))?
        .map_err(ApiError::from)
}

// POST /api/carts
#[instrument(skip(state))]
pub async fn create_cart(State(state): State<AppState>) -> (StatusCode, Json<CartResponse>) {
    let cart_id = state.carts.create();
    info!(%cart_id, "Cart opened");
    let response = CartResponse::new(&state, &cart_id, &Cart::new());
    (StatusCode::CREATED, Json(response))
}

// GET /api/carts/{cart}
#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> ApiResult<Json<CartResponse>> {
    state
        .carts
        .with_cart(&cart_id, |cart| CartResponse::new(&state, &cart_id, cart))
        .map(Json)
        .ok_or_else(|| cart_not_found(&cart_id))
}

// DELETE /api/carts/{cart}
#[instrument(skip(state))]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.carts.remove(&cart_id) {
        info!(%cart_id, "Cart dropped");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(cart_not_found(&cart_id))
    }
}

// POST /api/carts/{cart}/items
#[instrument(skip(state))]
pub async fn add_item(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
    Json(request): Json<AddItemRequest>,
) -> ApiResult<Json<CartResponse>> {
    validate_product_id(&request.product_id)?;
    validate_quantity(request.quantity)?;

    // Catalog read happens before the cart lock; the two locks are never held together
    let product = state.catalog.products().require(&request.product_id).await?;

    let response = mutate(&state, &cart_id, |cart| {
        let line = cart.add_item(&state.calculator, &product, request.quantity)?;
        debug!(
            product = %line.name,
            quantity = line.quantity,
            subtotal = %line.subtotal,
            "Added to cart"
        );
        Ok(())
    })?;
    Ok(Json(response))
}

// PUT /api/carts/{cart}/items/{product}
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
    Json(request): Json<UpdateItemRequest>,
) -> ApiResult<Json<CartResponse>> {
    validate_product_id(&product_id)?;

    let response = mutate(&state, &cart_id, |cart| {
        cart.update_quantity(&state.calculator, &product_id, request.quantity)
            .map(|_| ())
    })?;
    Ok(Json(response))
}

// DELETE /api/carts/{cart}/items/{product}
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(String, String)>,
) -> ApiResult<Json<CartResponse>> {
    validate_product_id(&product_id)?;

    let response = mutate(&state, &cart_id, |cart| {
        cart.remove_item(&product_id).map(|_| ())
    })?;
    Ok(Json(response))
}

// POST /api/carts/{cart}/clear
#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> ApiResult<Json<CartResponse>> {
    let response = mutate(&state, &cart_id, |cart| {
        cart.clear();
        Ok(())
    })?;
    Ok(Json(response))
}

// POST /api/carts/{cart}/checkout
#[instrument(skip(state))]
pub async fn checkout(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> ApiResult<Json<CheckoutResponse>> {
    let config = &state.config;

    let order = state
        .carts
        .with_cart(&cart_id, |cart| {
            OrderMessage::from_cart(&config.store_name, &config.currency_symbol, cart)
        })
        .ok_or_else(|| cart_not_found(&cart_id))??;

    info!(
        %cart_id,
        lines = order.line_count,
        total = %order.total,
        "Order message built"
    );

    Ok(Json(CheckoutResponse {
        url: order.whatsapp_link(&config.whatsapp_number),
        total_text: config.format_currency(order.total),
        order,
    }))
}
