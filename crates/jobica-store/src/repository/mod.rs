//! # Repository Module
//!
//! Catalog access behind a small async API.
//!
//! ```text
//! HTTP handler
//!      │  state.catalog.products().search(&query)
//!      ▼
//! ProductRepository
//! ├── list / search / get_by_id / count
//! └── insert / update / delete ──► products.json
//! ```

pub mod product;
