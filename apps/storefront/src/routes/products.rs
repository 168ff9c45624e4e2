//! # Product Endpoints
//!
//! Catalog browsing for shoppers and CRUD for the admin screens.
//!
//! ```text
//! GET    /api/products?search=&category=&unit=   filtered list
//! POST   /api/products                            create (201)
//! GET    /api/products/{id}                       detail page
//! PUT    /api/products/{id}                       replace editable fields
//! DELETE /api/products/{id}                       delete
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use jobica_core::order::product_inquiry;
use jobica_core::pricing::{HALF_ROW_SIZE, ROW_SIZE};
use jobica_core::validation::{validate_category, validate_product_id, validate_search_query};
use jobica_core::{CatalogQuery, ContactLink, Money, Product, ProductInput, ProductUnit};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Label shown instead of a price when the selling price is not set.
pub const PRICE_NOT_AVAILABLE: &str = "Price not available";

/// Raw query string of the product list.
///
/// Kept as strings so a bad `unit` comes back as a JSON validation error
/// rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
}

impl TryFrom<ListParams> for CatalogQuery {
    type Error = ApiError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let search = params
            .search
            .as_deref()
            .map(validate_search_query)
            .transpose()?
            .filter(|s| !s.is_empty());

        let category = params
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        if let Some(category) = &category {
            validate_category(category)?;
        }

        let unit = match params.unit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<ProductUnit>()
                    .map_err(|e| ApiError::validation(e.to_string()))?,
            ),
        };

        Ok(CatalogQuery {
            search,
            category,
            unit,
        })
    }
}

/// Product as shown on its detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: Option<Money>,
    /// "₦200" or "Price not available".
    pub price_label: String,
    /// Bundle offer, e.g. "Row of 5: ₦800". The half row is only offered
    /// when there is no row price.
    pub offers: Vec<String>,
    /// "Ask about this product" link.
    pub inquiry: ContactLink,
}

impl ProductDetail {
    fn new(state: &AppState, product: Product) -> Self {
        let config = &state.config;
        let pricing = product.pricing();

        let display_price = product.display_price();
        let price_label = display_price
            .map(|price| config.format_currency(price))
            .unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string());

        let mut offers = Vec::new();
        if let Some(row) = pricing.active_row_price() {
            offers.push(format!("Row of {ROW_SIZE}: {}", config.format_currency(row)));
        } else if let Some(half_row) = pricing.active_half_row_price() {
            offers.push(format!(
                "Half row of {HALF_ROW_SIZE}: {}",
                config.format_currency(half_row)
            ));
        }

        let inquiry = ContactLink::new(
            &config.whatsapp_number,
            product_inquiry(&config.store_name, &product.name),
        );

        ProductDetail {
            product,
            display_price,
            price_label,
            offers,
            inquiry,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: &'static str,
}

// GET /api/products
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let query = CatalogQuery::try_from(params)?;
    let products = state.catalog.products().search(&query).await;
    Ok(Json(products))
}

// POST /api/products
#[instrument(skip(state, input), fields(name = %input.name))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let product = state.catalog.products().insert(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDetail>> {
    validate_product_id(&id)?;
    let product = state.catalog.products().require(&id).await?;
    debug!(id = %product.id, "Product detail");
    Ok(Json(ProductDetail::new(&state, product)))
}

// PUT /api/products/{id}
#[instrument(skip(state, input))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<UpdateResponse>> {
    validate_product_id(&id)?;
    let product = state.catalog.products().update(&id, input).await?;
    Ok(Json(UpdateResponse {
        success: true,
        product,
    }))
}

// DELETE /api/products/{id}
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    validate_product_id(&id)?;
    state.catalog.products().delete(&id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Product deleted",
    }))
}
