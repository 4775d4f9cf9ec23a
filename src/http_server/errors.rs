//! # HTTP API Errors
//!
//! Maps catalog outcomes and body rejections onto status codes.
//! Every error body is `{"message": ...}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Body was not JSON or had wrongly typed fields
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Catalog(CatalogError::Validation) => StatusCode::BAD_REQUEST,
            ApiError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Catalog(CatalogError::LockPoisoned) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message returned to the client
    fn message(&self) -> String {
        match self {
            ApiError::Catalog(CatalogError::LockPoisoned) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(MessageResponse {
            message: self.message(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(CatalogError::Validation).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CatalogError::NotFound("x".to_string())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CatalogError::LockPoisoned).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(CatalogError::NotFound("x".to_string())).message(),
            "Book not found"
        );
        assert_eq!(
            ApiError::from(CatalogError::Validation).message(),
            "Title and author are required"
        );
        assert_eq!(
            ApiError::from(CatalogError::LockPoisoned).message(),
            "Internal server error"
        );
    }
}
