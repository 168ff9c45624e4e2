//! # Product Repository
//!
//! CRUD and search over the catalog.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert / update / delete                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_product_input ──✗──► StoreError::Validation                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.write().await   (one writer at a time)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = clone + change ──► persist(next) ──✗──► StoreError::Io         │
//! │       │                                         (memory unchanged)     │
//! │       ▼                                                                 │
//! │  *products = next                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::Utc;
use jobica_core::validation::validate_product_input;
use jobica_core::{generate_product_id, CatalogQuery, Product, ProductInput};
use tracing::{debug, info};

use crate::catalog::CatalogInner;
use crate::error::{StoreError, StoreResult};

const ENTITY: &str = "Product";

/// Repository for product operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = catalog.products();
///
/// let rice = repo.search(&CatalogQuery::search("rice")).await;
/// let product = repo.get_by_id("1").await;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    inner: Arc<CatalogInner>,
}

impl ProductRepository {
    pub(crate) fn new(inner: Arc<CatalogInner>) -> Self {
        ProductRepository { inner }
    }

    /// All products, in catalog order.
    pub async fn list(&self) -> Vec<Product> {
        self.inner.products.read().await.clone()
    }

    /// Products matching the search box and filters.
    pub async fn search(&self, query: &CatalogQuery) -> Vec<Product> {
        let products = self.inner.products.read().await;
        let results = query.apply(products.iter());

        debug!(
            search = ?query.search,
            category = ?query.category,
            unit = ?query.unit,
            count = results.len(),
            "Catalog search"
        );
        results
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Some(Product)` - Product found
    /// * `None` - No product with that id
    pub async fn get_by_id(&self, id: &str) -> Option<Product> {
        self.inner
            .products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Like [`get_by_id`](Self::get_by_id) but a missing id is an error.
    pub async fn require(&self, id: &str) -> StoreResult<Product> {
        self.get_by_id(id)
            .await
            .ok_or_else(|| StoreError::not_found(ENTITY, id))
    }

    pub async fn count(&self) -> usize {
        self.inner.products.read().await.len()
    }

    /// Creates a product with a fresh id.
    pub async fn insert(&self, input: ProductInput) -> StoreResult<Product> {
        validate_product_input(&input)?;
        let product = Product::from_input(generate_product_id(), input, Utc::now());

        let mut products = self.inner.products.write().await;
        let mut next = products.clone();
        next.push(product.clone());
        self.inner.persist(&next).await?;
        *products = next;

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replaces every editable field of a product.
    ///
    /// The id is kept and `updated_at` is bumped.
    pub async fn update(&self, id: &str, input: ProductInput) -> StoreResult<Product> {
        validate_product_input(&input)?;

        let mut products = self.inner.products.write().await;
        let index = position(&products, id)?;

        let mut next = products.clone();
        next[index].apply(input, Utc::now());
        let updated = next[index].clone();
        self.inner.persist(&next).await?;
        *products = next;

        info!(id = %updated.id, name = %updated.name, "Product updated");
        Ok(updated)
    }

    /// Deletes a product and returns it.
    pub async fn delete(&self, id: &str) -> StoreResult<Product> {
        let mut products = self.inner.products.write().await;
        let index = position(&products, id)?;

        let mut next = products.clone();
        let removed = next.remove(index);
        self.inner.persist(&next).await?;
        *products = next;

        info!(id = %removed.id, name = %removed.name, "Product deleted");
        Ok(removed)
    }
}

fn position(products: &[Product], id: &str) -> StoreResult<usize> {
    products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| StoreError::not_found(ENTITY, id))
}

// =============================================================================
// Unit Tests
// =============================================================================
