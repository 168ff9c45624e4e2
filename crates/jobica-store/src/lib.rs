//! # jobica-store: Catalog Layer for the JOBICA Storefront
//!
//! Owns `products.json`, the flat file that holds the whole catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  GET /api/products?search=rice                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   jobica-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐                  │   │
//! │  │   │   Catalog     │    │ ProductRepository  │                  │   │
//! │  │   │ (catalog.rs)  │◄───│ (product.rs)       │                  │   │
//! │  │   │ RwLock<Vec>   │    │ CRUD + search      │                  │   │
//! │  │   └───────┬───────┘    └────────────────────┘                  │   │
//! │  └───────────┼─────────────────────────────────────────────────────┘   │
//! │              ▼                                                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 ./data/products.json                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jobica_store::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::open(CatalogConfig::new("./data/products.json")).await?;
//! let rice = catalog.products().search(&CatalogQuery::search("rice")).await;
//! ```

pub mod catalog;
pub mod error;
mod legacy;
pub mod repository;

pub use catalog::{Catalog, CatalogConfig};
pub use error::{StoreError, StoreResult};
pub use repository::product::ProductRepository;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use jobica_core::{generate_product_id, ProductInput, ProductUnit};

    pub(crate) fn sample_input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            brand: None,
            category: "Noodles & Pasta".to_string(),
            unit: ProductUnit::Pack,
            size: None,
            selling_price_kobo: 50_000,
            row_price_kobo: Some(240_000),
            half_row_price_kobo: None,
            price_per_unit_kobo: None,
            cost_price_kobo: None,
            image_url: None,
            tags: Vec::new(),
            notes: None,
        }
    }

    /// Unique catalog path under the system temp directory.
    pub(crate) fn temp_catalog_path() -> PathBuf {
        std::env::temp_dir().join(format!("jobica-store-{}.json", generate_product_id()))
    }
}
