//! Book HTTP Routes
//!
//! CRUD endpoints for catalog records, mounted under `/api`.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::errors::ApiResult;
use crate::catalog::{Book, BookInput, BookStore, CatalogError, CatalogResult};

// ==================
// Shared State
// ==================

/// Catalog state shared across handlers
///
/// Each store call holds the lock for its full duration, so concurrent
/// requests never observe a half-applied mutation.
#[derive(Debug, Default)]
pub struct CatalogState {
    store: RwLock<BookStore>,
}

impl CatalogState {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn read(&self) -> CatalogResult<RwLockReadGuard<'_, BookStore>> {
        self.store.read().map_err(|_| CatalogError::LockPoisoned)
    }

    pub fn write(&self) -> CatalogResult<RwLockWriteGuard<'_, BookStore>> {
        self.store.write().map_err(|_| CatalogError::LockPoisoned)
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct DeleteBookResponse {
    pub message: String,
    pub book: Book,
}

// ==================
// Book Routes
// ==================

/// Create book routes
pub fn book_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_books_handler(State(state): State<Arc<CatalogState>>) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(state.read()?.list()))
}

async fn get_book_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    Ok(Json(state.read()?.get(&id)?))
}

async fn create_book_handler(
    State(state): State<Arc<CatalogState>>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let Json(input) = body?;
    let book = state.write()?.create(&input)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
    body: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let mut store = state.write()?;
    // An unknown id wins over a bad body.
    store.get(&id)?;
    let Json(input) = body?;
    Ok(Json(store.update(&id, &input)?))
}

async fn delete_book_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteBookResponse>> {
    let book = state.write()?.delete(&id)?;
    Ok(Json(DeleteBookResponse {
        message: "Book deleted successfully".to_string(),
        book,
    }))
}
