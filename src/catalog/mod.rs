//! # Catalog
//!
//! The book record store: entity types, request normalization and the
//! in-memory keyed collection that owns every record.
//!
//! Callers only ever receive clones of stored books.

mod book;
mod errors;
mod store;

pub use book::{Book, BookFields, BookInput, YearValue};
pub use errors::{CatalogError, CatalogResult};
pub use store::BookStore;
