//! # Error Types
//!
//! Domain-specific error types for jobica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jobica-core errors (this file)                                        │
//! │  ├── CoreError        - Pricing, cart and checkout rule violations     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  jobica-store errors (separate crate)                                  │
//! │  └── StoreError       - Catalog file operation failures                │
//! │                                                                         │
//! │  Storefront API errors (in app)                                        │
//! │  └── ApiError         - What the browser sees (JSON body + status)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Browser   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity handed to the pricing calculator was negative.
    ///
    /// Callers reject these before pricing; seeing this error means a
    /// layer above skipped its check.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// A product's pricing fields cannot be priced (negative unit price, or
    /// a subtotal too large for an `i64` kobo amount).
    #[error("Invalid pricing for {product}: {reason}")]
    InvalidPricingConfig { product: String, reason: String },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Adding or changing a line would push the cart total past `i64`.
    #[error("Cart total is too large")]
    CartTotalTooLarge,

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Line targeted by an update/remove is not in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Checkout was requested with nothing in the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart (0 lines)
    ///      │
    ///      ▼
    /// "Order via WhatsApp"
    ///      │
    ///      ▼
    /// EmptyCart
    ///      │
    ///      ▼
    /// UI shows: "Your cart is empty"
    /// ```
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a phone number with letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPricingConfig {
            product: "Gino Tomato Paste".to_string(),
            reason: "unit price is negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid pricing for Gino Tomato Paste: unit price is negative"
        );

        assert_eq!(CoreError::InvalidQuantity(-2).to_string(), "Invalid quantity: -2");
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "category".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
