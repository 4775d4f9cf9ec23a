//! # Catalog Errors
//!
//! Error types for the record store.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Title or author missing or empty
    #[error("Title and author are required")]
    Validation,

    /// No live record with this id
    #[error("Book not found")]
    NotFound(String),

    /// The lock guarding the store was poisoned by a panicking writer
    #[error("Catalog lock poisoned")]
    LockPoisoned,
}
