//! # HTTP Server Module
//!
//! JSON API over the book store.
//!
//! # Endpoints
//!
//! - `/healthz` - Health check
//! - `/api/books` - List and create books
//! - `/api/books/{id}` - Read, update and delete one book
//!
//! Any other path falls back to the static front-end directory when present.

pub mod book_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;

pub use book_routes::CatalogState;
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
