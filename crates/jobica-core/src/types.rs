//! # Domain Types
//!
//! Catalog types shared by the store, the cart and the HTTP layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌─────────────────┐   ┌─────────────────┐  │
//! │  │       Product        │   │  ProductUnit    │   │  ProductInput   │  │
//! │  │  ──────────────────  │   │  ─────────────  │   │  ─────────────  │  │
//! │  │  id                  │   │  Sachet, Tin,   │   │  admin form     │  │
//! │  │  name, brand         │   │  Bottle, Carton │   │  payload for    │  │
//! │  │  category, unit      │   │  Pack, Crate,   │   │  create/update  │  │
//! │  │  selling_price_kobo  │   │  Bowl, Nylon,   │   └─────────────────┘  │
//! │  │  row/half_row price  │   │  Bag            │                        │
//! │  └──────────────────────┘   └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are serialized in camelCase, which is also the on-disk format of
//! `products.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::PricingConfig;

/// Image shown until the admin uploads a real one.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.png";

/// Shelf categories offered in the admin form and the catalog filter.
pub const CATEGORIES: &[&str] = &[
    "Tomato Products",
    "Seasoning & Spices",
    "Noodles & Pasta",
    "Cooking Oil",
    "Grains & Foodstuff",
    "Eggs & Protein",
    "Condiments",
    "Non-Food",
    "Others",
];

// =============================================================================
// Product Unit
// =============================================================================

/// How a product is packaged on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductUnit {
    Sachet,
    Tin,
    Bottle,
    Carton,
    Pack,
    Crate,
    Bowl,
    Nylon,
    Bag,
}

impl ProductUnit {
    pub const ALL: [ProductUnit; 9] = [
        ProductUnit::Sachet,
        ProductUnit::Tin,
        ProductUnit::Bottle,
        ProductUnit::Carton,
        ProductUnit::Pack,
        ProductUnit::Crate,
        ProductUnit::Bowl,
        ProductUnit::Nylon,
        ProductUnit::Bag,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::Sachet => "sachet",
            ProductUnit::Tin => "tin",
            ProductUnit::Bottle => "bottle",
            ProductUnit::Carton => "carton",
            ProductUnit::Pack => "pack",
            ProductUnit::Crate => "crate",
            ProductUnit::Bowl => "bowl",
            ProductUnit::Nylon => "nylon",
            ProductUnit::Bag => "bag",
        }
    }
}

impl fmt::Display for ProductUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a unit string is not one of [`ProductUnit::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown product unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for ProductUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ProductUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == needle)
            .ok_or_else(|| UnknownUnit(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, generated on create and never changed.
    pub id: String,

    /// Display name (e.g. "Gino Tomato Paste").
    pub name: String,

    #[serde(default)]
    pub brand: Option<String>,

    /// One of [`CATEGORIES`].
    pub category: String,

    pub unit: ProductUnit,

    /// Pack size as printed on the label (e.g. "70g", "1L").
    #[serde(default)]
    pub size: Option<String>,

    /// Price of a single unit in kobo. Zero means "price not set yet".
    pub selling_price_kobo: i64,

    /// Bundle price for a row of 5 units.
    #[serde(default)]
    pub row_price_kobo: Option<i64>,

    /// Bundle price for a half row of 3 units.
    #[serde(default)]
    pub half_row_price_kobo: Option<i64>,

    /// Informational per-piece price shown on the detail page.
    #[serde(default)]
    pub price_per_unit_kobo: Option<i64>,

    /// What the shop paid; admin only.
    #[serde(default)]
    pub cost_price_kobo: Option<i64>,

    pub image_url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product from a validated admin payload.
    pub fn from_input(id: impl Into<String>, input: ProductInput, now: DateTime<Utc>) -> Self {
        let mut product = Product {
            id: id.into(),
            name: String::new(),
            brand: None,
            category: String::new(),
            unit: input.unit,
            size: None,
            selling_price_kobo: 0,
            row_price_kobo: None,
            half_row_price_kobo: None,
            price_per_unit_kobo: None,
            cost_price_kobo: None,
            image_url: String::new(),
            tags: Vec::new(),
            notes: None,
            updated_at: now,
        };
        product.apply(input, now);
        product
    }

    /// Replaces every editable field with the payload's values.
    ///
    /// The id is preserved; `updated_at` moves to `now`.
    pub fn apply(&mut self, input: ProductInput, now: DateTime<Utc>) {
        let input = input.normalized();
        self.name = input.name;
        self.brand = input.brand;
        self.category = input.category;
        self.unit = input.unit;
        self.size = input.size;
        self.selling_price_kobo = input.selling_price_kobo;
        self.row_price_kobo = input.row_price_kobo;
        self.half_row_price_kobo = input.half_row_price_kobo;
        self.price_per_unit_kobo = input.price_per_unit_kobo;
        self.cost_price_kobo = input.cost_price_kobo;
        self.image_url = input
            .image_url
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());
        self.tags = input.tags;
        self.notes = input.notes;
        self.updated_at = now;
    }

    /// Returns the selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_kobo(self.selling_price_kobo)
    }

    /// The price to show shoppers, or `None` for "price not available".
    pub fn display_price(&self) -> Option<Money> {
        let price = self.selling_price();
        price.is_positive().then_some(price)
    }

    /// Pricing fields consumed by the [`PricingCalculator`](crate::pricing::PricingCalculator).
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            unit_price: self.selling_price(),
            row_price: self.row_price_kobo.map(Money::from_kobo),
            half_row_price: self.half_row_price_kobo.map(Money::from_kobo),
        }
    }

    /// Brand for order slips; unbranded goods print as "Generic".
    pub fn brand_or_generic(&self) -> &str {
        self.brand.as_deref().unwrap_or("Generic")
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// Admin form payload used for both create and update.
///
/// Update is a full replacement of the editable fields: sending no
/// `rowPriceKobo` clears the row price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub category: String,
    pub unit: ProductUnit,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub selling_price_kobo: i64,
    #[serde(default)]
    pub row_price_kobo: Option<i64>,
    #[serde(default)]
    pub half_row_price_kobo: Option<i64>,
    #[serde(default)]
    pub price_per_unit_kobo: Option<i64>,
    #[serde(default)]
    pub cost_price_kobo: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ProductInput {
    /// Trims text fields, turns blank optionals into `None` and drops
    /// empty tags.
    pub fn normalized(self) -> Self {
        ProductInput {
            name: self.name.trim().to_string(),
            brand: non_blank(self.brand),
            category: self.category.trim().to_string(),
            unit: self.unit,
            size: non_blank(self.size),
            selling_price_kobo: self.selling_price_kobo,
            row_price_kobo: self.row_price_kobo,
            half_row_price_kobo: self.half_row_price_kobo,
            price_per_unit_kobo: self.price_per_unit_kobo,
            cost_price_kobo: self.cost_price_kobo,
            image_url: non_blank(self.image_url),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            notes: non_blank(self.notes),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
