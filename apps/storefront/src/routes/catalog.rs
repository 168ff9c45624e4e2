//! # Catalog Metadata and Image Upload
//!
//! The admin form's dropdowns are filled from `GET /api/catalog/meta`.
//! `POST /api/upload` hands out the URL an image will be served from;
//! the bytes themselves are not stored.

use axum::extract::State;
use axum::Json;
use jobica_core::validation::validate_image_filename;
use jobica_core::{ProductUnit, CATEGORIES, PLACEHOLDER_IMAGE_URL};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiResult;
use crate::state::AppState;

const IMAGE_BASE_PATH: &str = "/images";

/// Characters left as-is in the file name part of an image URL.
const FILE_NAME: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    pub store_name: String,
    pub categories: Vec<&'static str>,
    pub units: Vec<ProductUnit>,
    pub placeholder_image_url: &'static str,
    pub product_count: usize,
}

// GET /api/catalog/meta
#[instrument(skip(state))]
pub async fn meta(State(state): State<AppState>) -> Json<CatalogMeta> {
    Json(CatalogMeta {
        store_name: state.config.store_name.clone(),
        categories: CATEGORIES.to_vec(),
        units: ProductUnit::ALL.to_vec(),
        placeholder_image_url: PLACEHOLDER_IMAGE_URL,
        product_count: state.catalog.products().count().await,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

// POST /api/upload
#[instrument]
pub async fn upload(Json(request): Json<UploadRequest>) -> ApiResult<Json<UploadResponse>> {
    let filename = match request.filename.filter(|f| !f.trim().is_empty()) {
        Some(filename) => {
            validate_image_filename(&filename)?;
            filename
        }
        None => format!("product-{}.jpg", chrono::Utc::now().timestamp_millis()),
    };

    let image_url = format!(
        "{IMAGE_BASE_PATH}/{}",
        utf8_percent_encode(&filename, FILE_NAME)
    );
    info!(%image_url, "Image URL assigned");
    Ok(Json(UploadResponse { image_url }))
}
