//! # Price Quotes
//!
//! `POST /api/pricing/quote` prices a quantity of one product without
//! touching any cart. The product page uses it to show the running price
//! as the shopper changes the quantity.

use axum::extract::State;
use axum::Json;
use jobica_core::validation::{validate_product_id, validate_quantity};
use jobica_core::{Money, PriceBreakdown};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub subtotal: Money,
    /// "₦1,200"
    pub subtotal_text: String,
    /// "2 rows + 1 unit"
    pub summary: String,
    pub breakdown: PriceBreakdown,
}

// POST /api/pricing/quote
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<Json<QuoteResponse>> {
    validate_product_id(&request.product_id)?;
    // Zero is a valid quote (an empty quantity box)
    if request.quantity != 0 {
        validate_quantity(request.quantity)?;
    }

    let product = state.catalog.products().require(&request.product_id).await?;
    let breakdown = state
        .calculator
        .breakdown(&product.pricing(), &product.name, request.quantity)?;

    debug!(
        product = %product.name,
        quantity = request.quantity,
        tier = ?breakdown.tier,
        subtotal = %breakdown.subtotal,
        "Quote"
    );

    Ok(Json(QuoteResponse {
        product_id: product.id,
        name: product.name,
        quantity: request.quantity,
        subtotal: breakdown.subtotal,
        subtotal_text: state.config.format_currency(breakdown.subtotal),
        summary: breakdown.describe(),
        breakdown,
    }))
}
