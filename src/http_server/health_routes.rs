//! Health HTTP Routes

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness route at `/healthz`
pub fn health_routes() -> Router {
    Router::new().route("/healthz", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
    };

    (StatusCode::OK, Json(response))
}
