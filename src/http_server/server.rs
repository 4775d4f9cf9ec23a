//! # HTTP Server
//!
//! Combines the book and health routers, CORS, request tracing and the
//! optional static front-end into one axum server.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::book_routes::{book_routes, CatalogState};
use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use crate::catalog::BookStore;

/// HTTP Server for the library catalog
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<CatalogState>,
    router: Router,
}

impl HttpServer {
    /// Create a server around an already constructed store
    pub fn new(config: HttpServerConfig, store: BookStore) -> Self {
        let state = Arc::new(CatalogState::new(store));
        let router = Self::build_router(&config, state.clone());
        Self {
            config,
            state,
            router,
        }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, state: Arc<CatalogState>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = Router::new()
            .merge(health_routes())
            .nest("/api", book_routes(state));

        let router = match config.existing_static_dir() {
            Some(dir) => router.fallback_service(ServeDir::new(dir)),
            None => router,
        };

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared catalog state (for inspection and testing)
    pub fn state(&self) -> Arc<CatalogState> {
        self.state.clone()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        match self.config.existing_static_dir() {
            Some(dir) => tracing::info!(static_dir = %dir.display(), "serving static files"),
            None => tracing::debug!(
                static_dir = %self.config.static_dir.display(),
                "static directory not found, serving API only"
            ),
        }
        tracing::info!(%addr, "library catalog listening on http://{}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
