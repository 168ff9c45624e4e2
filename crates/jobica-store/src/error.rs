//! # Store Error Types
//!
//! Error types for catalog operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / ValidationError                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and entity id           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront) ← JSON body + HTTP status                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use jobica_core::ValidationError;
use thiserror::Error;

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the catalog.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Reading or writing the catalog file failed.
    ///
    /// ## When This Occurs
    /// - Parent directory not writable
    /// - Read-only filesystem
    /// - Disk full
    #[error("Catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file exists but is not a JSON array of products.
    #[error("Catalog file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the catalog for writing failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected product payload.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for catalog operations.
pub type StoreResult<T> = Result<T, StoreError>;
