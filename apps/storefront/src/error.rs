//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Browser                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  fetch('/api/carts/{id}/items', POST)                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler                                                         │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── StoreError::NotFound { .. } ──┐             │  │
//! │  │         │                                         │             │  │
//! │  │         ▼                                         ▼             │  │
//! │  │  Cart Error? ─── CoreError::QuantityTooLarge ── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── 422 { "code": "CART_ERROR", "message": "Quantity 1000 ..." }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jobica_core::{CoreError, ValidationError};
use jobica_store::StoreError;
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the browser receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Business rule rejected the request (422)
    BusinessLogic,

    /// Cart operation failed (422)
    CartError,

    /// Catalog file could not be read or written (500)
    StorageError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::BusinessLogic | ErrorCode::CartError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::StorageError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts catalog errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Validation(e) => e.into(),
            StoreError::Io { .. } | StoreError::Corrupt { .. } => {
                // Log the path and cause; the browser only gets a generic message
                tracing::error!(error = %err, "Catalog storage failed");
                ApiError::new(ErrorCode::StorageError, "Catalog could not be saved")
            }
            StoreError::Serialization(e) => {
                tracing::error!(error = %e, "Catalog serialization failed");
                ApiError::new(ErrorCode::Internal, "Catalog could not be saved")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::InvalidQuantity(_) => ApiError::validation(err.to_string()),
            CoreError::InvalidPricingConfig { .. } => {
                tracing::warn!(error = %err, "Product cannot be priced");
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::CartTotalTooLarge
            | CoreError::EmptyCart => ApiError::cart(err.to_string()),
            CoreError::ItemNotInCart(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_screaming_snake_case() {
        let err = ApiError::cart("Cart is empty");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "CART_ERROR");
        assert_eq!(json["message"], "Cart is empty");
    }

    #[test]
    fn test_store_errors_map_to_status() {
        let err: ApiError = StoreError::not_found("Product", "42").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");

        let io = StoreError::Io {
            path: "/ro/products.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        };
        let err: ApiError = io.into();
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message.contains("/ro/"));
    }

    #[test]
    fn test_core_errors_map_to_status() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = CoreError::CartTotalTooLarge.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::ItemNotInCart("7".to_string()).into();
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);

        let err: ApiError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
    }
}
