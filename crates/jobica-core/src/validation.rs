//! # Validation Module
//!
//! Input validation for the storefront and the admin screens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── Required fields, number inputs                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (Rust)                                          │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / PricingCalculator                                     │
//! │  └── Hard limits (quantity caps, negative prices)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use jobica_core::validation::{validate_category, validate_quantity};
//!
//! validate_category("Cooking Oil").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{ProductInput, CATEGORIES};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_KOBO};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use jobica_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Gino Tomato Paste").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates that a category is one of [`CATEGORIES`].
pub fn validate_category(category: &str) -> ValidationResult<()> {
    let category = category.trim();

    if category.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if !CATEGORIES.contains(&category) {
        return Err(ValidationError::NotAllowed {
            field: "category".to_string(),
            allowed: CATEGORIES.iter().map(|c| c.to_string()).collect(),
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a product id from a URL path.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, digits, hyphens and underscores only
///
/// Seeded products use short ids like `"1"`; new products get UUIDs.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a WhatsApp number: country code plus subscriber number, digits
/// only, no leading `+`.
///
/// ```rust
/// use jobica_core::validation::validate_whatsapp_number;
///
/// assert!(validate_whatsapp_number("2347065096131").is_ok());
/// assert!(validate_whatsapp_number("+2347065096131").is_err());
/// ```
pub fn validate_whatsapp_number(number: &str) -> ValidationResult<()> {
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "whatsapp number".to_string(),
            reason: "digits only, country code first, no '+'".to_string(),
        });
    }

    if !(8..=15).contains(&number.len()) {
        return Err(ValidationError::OutOfRange {
            field: "whatsapp number length".to_string(),
            min: 8,
            max: 15,
        });
    }

    Ok(())
}

/// Validates an uploaded image's file name.
///
/// Only a bare file name is accepted; anything that could climb out of the
/// images directory is rejected.
pub fn validate_image_filename(filename: &str) -> ValidationResult<()> {
    if filename.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "filename".to_string(),
        });
    }

    if filename.len() > 255 {
        return Err(ValidationError::TooLong {
            field: "filename".to_string(),
            max: 255,
        });
    }

    if filename.starts_with('.')
        || filename.contains("..")
        || filename.contains(['/', '\\'])
        || filename.chars().any(char::is_control)
    {
        return Err(ValidationError::InvalidFormat {
            field: "filename".to_string(),
            reason: "must be a plain file name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in kobo.
///
/// ## Example
/// ```rust
/// use jobica_core::validation::validate_price_kobo;
///
/// assert!(validate_price_kobo("sellingPrice", 20_000).is_ok());
/// assert!(validate_price_kobo("sellingPrice", 0).is_ok());  // not priced yet
/// assert!(validate_price_kobo("sellingPrice", -100).is_err());
/// assert!(validate_price_kobo("sellingPrice", i64::MAX).is_err());
/// ```
pub fn validate_price_kobo(field: &str, kobo: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_KOBO).contains(&kobo) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_KOBO,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full admin payload before it reaches the store.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_category(&input.category)?;
    validate_price_kobo("sellingPriceKobo", input.selling_price_kobo)?;

    let optional_prices = [
        ("rowPriceKobo", input.row_price_kobo),
        ("halfRowPriceKobo", input.half_row_price_kobo),
        ("pricePerUnitKobo", input.price_per_unit_kobo),
        ("costPriceKobo", input.cost_price_kobo),
    ];
    for (field, price) in optional_prices {
        if let Some(kobo) = price {
            validate_price_kobo(field, kobo)?;
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::sample_input;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Gino Tomato Paste").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category("Tomato Products").is_ok());
        assert!(validate_category(" Non-Food ").is_ok());
        assert!(matches!(validate_category(""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            validate_category("Electronics"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  rice ").unwrap(), "rice");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("1").is_ok());
        assert!(validate_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("../etc").is_err());
        assert!(validate_product_id(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_whatsapp_number() {
        assert!(validate_whatsapp_number("2347065096131").is_ok());
        assert!(validate_whatsapp_number("1234567").is_err());
        assert!(validate_whatsapp_number("234 706 509").is_err());
    }

    #[test]
    fn test_validate_image_filename() {
        assert!(validate_image_filename("gino-paste.jpg").is_ok());
        assert!(validate_image_filename("").is_err());
        assert!(validate_image_filename("../secret.png").is_err());
        assert!(validate_image_filename("dir/file.png").is_err());
        assert!(validate_image_filename(".hidden").is_err());
    }

    #[test]
    fn test_validate_product_input() {
        assert!(validate_product_input(&sample_input()).is_ok());

        let mut bad_price = sample_input();
        bad_price.half_row_price_kobo = Some(-1);
        let err = validate_product_input(&bad_price).unwrap_err();
        assert!(err.to_string().starts_with("halfRowPriceKobo"));

        let mut too_dear = sample_input();
        too_dear.selling_price_kobo = 10_000_000_000_000_000;
        assert!(matches!(
            validate_product_input(&too_dear),
            Err(ValidationError::OutOfRange { max: MAX_PRICE_KOBO, .. })
        ));

        let mut at_cap = sample_input();
        at_cap.row_price_kobo = Some(MAX_PRICE_KOBO);
        assert!(validate_product_input(&at_cap).is_ok());

        let mut bad_category = sample_input();
        bad_category.category = "Toys".to_string();
        assert!(validate_product_input(&bad_category).is_err());
    }
}
