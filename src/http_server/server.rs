//! # HTTP Server
//!
//! Wires the configured store, the item routes and the middleware stack
//! into one Axum server.

use std::any::Any;
use std::sync::Arc;

use axum::middleware;
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use super::config::{ServerConfig, StorageBackend};
use super::cors::{cors_headers, cors_layer};
use super::item_routes::{item_routes, route_not_found};
use super::response::server_error;
use crate::items::ItemService;
use crate::store::{FileStore, ItemStore, MemoryStore};

/// HTTP server for the item API
pub struct HttpServer {
    config: ServerConfig,
    service: Arc<ItemService>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: ServerConfig) -> Self {
        let store = Self::build_store(&config);
        Self::with_store(config, store)
    }

    /// Create a server over an existing store
    pub fn with_store(config: ServerConfig, store: Arc<dyn ItemStore>) -> Self {
        let service = Arc::new(ItemService::new(store));
        let router = Self::build_router(service.clone());
        Self {
            config,
            service,
            router,
        }
    }

    fn build_store(config: &ServerConfig) -> Arc<dyn ItemStore> {
        match config.backend {
            StorageBackend::File => Arc::new(FileStore::new(config.data_file.clone())),
            StorageBackend::Memory if config.seed_sample => Arc::new(MemoryStore::seeded()),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
        }
    }

    /// Build the router with all middleware
    fn build_router(service: Arc<ItemService>) -> Router {
        with_middleware(
            Router::new()
                .merge(item_routes(service))
                .fallback(route_not_found),
        )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The item service behind the routes
    pub fn service(&self) -> &Arc<ItemService> {
        &self.service
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl+C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            addr = %local_addr,
            store = %self.service.store().describe(),
            "item server listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("item server stopped");
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Panic guard innermost, CORS around it, tracing outermost
fn with_middleware(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(middleware::from_fn(cors_headers))
        .layer(TraceLayer::new_for_http())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = detail, "handler panicked");
    server_error()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::routing::get;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = ServerConfig::with_port(8080);
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_store_selection() {
        let server = HttpServer::with_config(ServerConfig::in_memory(true));
        assert_eq!(server.service().store().describe(), "memory");

        let server = HttpServer::with_config(ServerConfig::with_data_file("items.json"));
        assert_eq!(server.service().store().describe(), "file:items.json");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new();
        let _router = server.router();
    }

    #[tokio::test]
    async fn test_handler_panic_is_server_error() {
        let router = with_middleware(Router::new().route("/boom", get(explode)));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/boom")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET,POST,PUT,PATCH,DELETE,OPTIONS"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"success": false, "message": "Server error"}));
    }
}
