//! Cross-origin headers
//!
//! `CorsLayer` answers every `OPTIONS` request itself and stamps the
//! allow-origin header on everything else. `cors_headers` runs outside it
//! to turn those answers into `204 No Content` and to add the allowed
//! methods and headers to every response, not only preflights.

use axum::extract::Request;
use axum::http::header::{self, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

/// Methods the item API answers to
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

const ALLOW_METHODS_VALUE: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
const ALLOW_HEADERS_VALUE: &str = "Content-Type";

/// Any origin, the item methods, and `Content-Type`
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS.to_vec())
        .allow_headers([header::CONTENT_TYPE])
}

/// Preflights become 204; allowed methods and headers go on every response
pub async fn cors_headers(request: Request, next: Next) -> Response {
    let preflight = request.method() == Method::OPTIONS;
    let mut response = next.run(request).await;

    if preflight {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }

    let headers = response.headers_mut();
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_METHODS)
        .or_insert(HeaderValue::from_static(ALLOW_METHODS_VALUE));
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static(ALLOW_HEADERS_VALUE));

    response
}
