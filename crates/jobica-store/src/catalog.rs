//! # Catalog Handle
//!
//! Loads `products.json` once and keeps the products in memory behind a
//! `tokio::sync::RwLock`. Every write rewrites the whole file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Lifecycle                               │
//! │                                                                         │
//! │  Server startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogConfig::new(path) ← or CatalogConfig::in_memory() for tests    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::open(config).await ← Parse products.json (missing = empty)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │   RwLock<Vec<Product>>                  │                           │
//! │  │   many readers ─┐   one writer ─┐       │                           │
//! │  └─────────────────┼───────────────┼───────┘                           │
//! │                    ▼               ▼                                    │
//! │         list / search / get    insert / update / delete                │
//! │                                    │                                    │
//! │                                    ▼                                    │
//! │                 products.json.tmp ──rename──► products.json            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A write builds the new product list, persists it, and only then swaps
//! it in. A failed write leaves both the file and the memory untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jobica_core::Product;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::legacy::LegacyProduct;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Catalog configuration.
///
/// ## Example
/// ```rust
/// use jobica_store::CatalogConfig;
///
/// let config = CatalogConfig::new("./data/products.json");
/// assert!(config.path.is_some());
/// assert!(CatalogConfig::in_memory().path.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Path to the catalog file. `None` keeps the catalog in memory only.
    pub path: Option<PathBuf>,

    /// Products to start with when there is no file (or no path).
    pub initial_products: Vec<Product>,
}

impl CatalogConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            path: Some(path.into()),
            initial_products: Vec::new(),
        }
    }

    /// Creates an in-memory catalog configuration (for testing).
    pub fn in_memory() -> Self {
        CatalogConfig {
            path: None,
            initial_products: Vec::new(),
        }
    }

    /// Seeds the catalog when nothing is loaded from disk.
    pub fn with_products(mut self, products: Vec<Product>) -> Self {
        self.initial_products = products;
        self
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug)]
pub(crate) struct CatalogInner {
    pub(crate) path: Option<PathBuf>,
    pub(crate) products: RwLock<Vec<Product>>,
}

impl CatalogInner {
    /// Writes `products` to disk (no-op for in-memory catalogs).
    pub(crate) async fn persist(&self, products: &[Product]) -> StoreResult<()> {
        match &self.path {
            Some(path) => write_catalog_file(path, products).await,
            None => Ok(()),
        }
    }
}

/// Shared handle to the product catalog. Cheap to clone.
///
/// ## Usage in Handlers
/// ```rust,ignore
/// async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
///     let products = state.catalog.products().list().await;
///     Ok(Json(products))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

impl Catalog {
    /// Opens the catalog.
    ///
    /// ## What This Does
    /// 1. Reads the JSON array at `config.path`, if there is one
    /// 2. Falls back to `config.initial_products` when the file is missing
    /// 3. Never creates the file; the first write does that
    ///
    /// ## Errors
    /// - `Io` if the file exists but cannot be read
    /// - `Corrupt` if it is not a JSON array of products
    pub async fn open(config: CatalogConfig) -> StoreResult<Self> {
        let products = match &config.path {
            Some(path) => match read_catalog_file(path).await? {
                Some(products) => {
                    info!(path = %path.display(), count = products.len(), "Catalog loaded");
                    products
                }
                None => {
                    warn!(path = %path.display(), "Catalog file missing, starting empty");
                    config.initial_products
                }
            },
            None => {
                info!(count = config.initial_products.len(), "Using in-memory catalog");
                config.initial_products
            }
        };

        Ok(Catalog {
            inner: Arc::new(CatalogInner {
                path: config.path,
                products: RwLock::new(products),
            }),
        })
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = catalog.products().search(&CatalogQuery::search("rice")).await;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(Arc::clone(&self.inner))
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }
}

// =============================================================================
// File Format
// =============================================================================

async fn read_catalog_file(path: &Path) -> StoreResult<Option<Vec<Product>>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    let source = match serde_json::from_slice::<Vec<Product>>(&bytes) {
        Ok(products) => return Ok(Some(products)),
        Err(source) => source,
    };

    // Older naira-denominated file; report the current-format error if
    // it is not that either
    let Ok(legacy) = serde_json::from_slice::<Vec<LegacyProduct>>(&bytes) else {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        });
    };
    let products = legacy
        .into_iter()
        .map(LegacyProduct::into_product)
        .collect::<StoreResult<Vec<_>>>()?;
    warn!(
        path = %path.display(),
        count = products.len(),
        "Converted naira-priced catalog; the next write saves it in kobo"
    );
    Ok(Some(products))
}

/// Pretty JSON, written to a sibling temp file and renamed into place.
async fn write_catalog_file(path: &Path, products: &[Product]) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(products)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &json)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), count = products.len(), bytes = json.len(), "Catalog written");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
