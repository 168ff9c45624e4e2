//! # Naira-Denominated Catalog Files
//!
//! Catalogs written before prices moved to kobo store naira amounts under
//! different keys. They are converted on load; the next write saves the
//! current format.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Older file                        Current file                         │
//! │  ──────────                        ────────────                         │
//! │  "sellingPrice": 200        ──►    "sellingPriceKobo": 20000            │
//! │  "pricePerRow": 800         ──►    "rowPriceKobo": 80000                │
//! │  "pricePerHalfRow": 400     ──►    "halfRowPriceKobo": 40000            │
//! │  "pricePerUnit": 40         ──►    "pricePerUnitKobo": 4000             │
//! │  "costPrice": 150           ──►    "costPriceKobo": 15000               │
//! │  "imageUrl": ""             ──►    placeholder image                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use jobica_core::money::KOBO_PER_NAIRA;
use jobica_core::validation::validate_price_kobo;
use jobica_core::{Product, ProductUnit, PLACEHOLDER_IMAGE_URL};
use serde::Deserialize;

use crate::error::StoreResult;

/// A product as the naira-denominated catalog stored it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyProduct {
    id: String,
    name: String,
    #[serde(default)]
    brand: Option<String>,
    category: String,
    unit: ProductUnit,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    selling_price: f64,
    #[serde(default)]
    price_per_row: Option<f64>,
    #[serde(default)]
    price_per_half_row: Option<f64>,
    #[serde(default)]
    price_per_unit: Option<f64>,
    #[serde(default)]
    cost_price: Option<f64>,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

impl LegacyProduct {
    pub(crate) fn into_product(self) -> StoreResult<Product> {
        let optional = |field: &str, naira: Option<f64>| -> StoreResult<Option<i64>> {
            naira.map(|n| to_kobo(field, n)).transpose()
        };

        let image_url = if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL.to_string()
        } else {
            self.image_url
        };

        Ok(Product {
            selling_price_kobo: to_kobo("sellingPrice", self.selling_price)?,
            row_price_kobo: optional("pricePerRow", self.price_per_row)?,
            half_row_price_kobo: optional("pricePerHalfRow", self.price_per_half_row)?,
            price_per_unit_kobo: optional("pricePerUnit", self.price_per_unit)?,
            cost_price_kobo: optional("costPrice", self.cost_price)?,
            id: self.id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            unit: self.unit,
            size: self.size,
            image_url,
            tags: self.tags,
            notes: self.notes,
            updated_at: self.updated_at,
        })
    }
}

/// Naira to kobo, rounded to the nearest kobo and held to the price range.
fn to_kobo(field: &str, naira: f64) -> StoreResult<i64> {
    // `as` saturates, so huge or infinite amounts land on the range check
    let kobo = (naira * KOBO_PER_NAIRA as f64).round() as i64;
    validate_price_kobo(field, kobo)?;
    Ok(kobo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn parse(json: &str) -> LegacyProduct {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_naira_fields_become_kobo() {
        let product = parse(
            r#"{
                "id": "1718000000000",
                "name": "Larsor Chicken Seasoning",
                "brand": "Larsor",
                "category": "Seasoning & Spices",
                "unit": "sachet",
                "sellingPrice": 200,
                "pricePerRow": 800,
                "costPrice": 150.5,
                "imageUrl": "",
                "tags": ["spice"],
                "updatedAt": "2024-06-10T09:30:00.000Z"
            }"#,
        )
        .into_product()
        .unwrap();

        assert_eq!(product.selling_price_kobo, 20_000);
        assert_eq!(product.row_price_kobo, Some(80_000));
        assert_eq!(product.half_row_price_kobo, None);
        assert_eq!(product.cost_price_kobo, Some(15_050));
        assert_eq!(product.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.updated_at.to_rfc3339(), "2024-06-10T09:30:00+00:00");
    }

    #[test]
    fn test_out_of_range_price_is_rejected() {
        let result = parse(
            r#"{
                "id": "9",
                "name": "Broken",
                "category": "Others",
                "unit": "pack",
                "sellingPrice": -5
            }"#,
        )
        .into_product();

        assert!(matches!(result, Err(StoreError::Validation(_))));

        let huge = parse(
            r#"{
                "id": "10",
                "name": "Too Dear",
                "category": "Others",
                "unit": "pack",
                "sellingPrice": 1e300
            }"#,
        )
        .into_product();
        assert!(matches!(huge, Err(StoreError::Validation(_))));
    }
}
