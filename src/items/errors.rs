//! # Item Errors
//!
//! Error types for item operations and routing.

use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for item operations
pub type ItemResult<T> = Result<T, ItemError>;

/// Item operation errors
#[derive(Debug, Error)]
pub enum ItemError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload is well-formed JSON but incomplete or of the wrong shape
    #[error("{0}")]
    Validation(String),

    /// Request body is not valid JSON
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),

    /// No item with the requested id
    #[error("Item not found")]
    NotFound,

    /// No route for this method and path
    #[error("Route not found")]
    RouteNotFound,

    /// Request body exceeds the accepted size
    #[error("Request body too large")]
    PayloadTooLarge,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Backing store write failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),
}

impl ItemError {
    /// Shorthand for the missing-name validation failure
    pub fn name_required() -> Self {
        ItemError::Validation("Name is required".to_string())
    }

    /// Shorthand for a payload that is not a JSON object
    pub fn object_required() -> Self {
        ItemError::Validation("Request body must be a JSON object".to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::MalformedBody(_) => StatusCode::BAD_REQUEST,

            ItemError::NotFound => StatusCode::NOT_FOUND,
            ItemError::RouteNotFound => StatusCode::NOT_FOUND,
            ItemError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            ItemError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to clients. Server-side failures never leak details.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Server error".to_string()
        } else {
            self.to_string()
        }
    }
}
