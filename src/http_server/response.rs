//! # Response Formatting
//!
//! Every response body is the same envelope:
//! `{"success": bool, "message"?: string, "data"?: any}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::items::{Item, ItemError};

/// Uniform response body
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Success with data only
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success with message and data
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Success with message only
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Failure with message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Successful item operation outcomes
#[derive(Debug, Clone)]
pub enum ItemResponse {
    Listed(Vec<Item>),
    Created(Item),
    Replaced(Item),
    Patched(Item),
    Deleted,
}

impl IntoResponse for ItemResponse {
    fn into_response(self) -> Response {
        match self {
            ItemResponse::Listed(items) => (StatusCode::OK, Json(Envelope::data(items))).into_response(),
            ItemResponse::Created(item) => (
                StatusCode::CREATED,
                Json(Envelope::with_message("Item added", item)),
            )
                .into_response(),
            ItemResponse::Replaced(item) => (
                StatusCode::OK,
                Json(Envelope::with_message("Item updated", item)),
            )
                .into_response(),
            ItemResponse::Patched(item) => (
                StatusCode::OK,
                Json(Envelope::with_message("Item patched", item)),
            )
                .into_response(),
            ItemResponse::Deleted => (StatusCode::OK, Json(Envelope::message("Item deleted"))).into_response(),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(Envelope::failure(self.public_message()))).into_response()
    }
}

/// The generic 500 response
pub fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::failure("Server error")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_serialization() {
        let envelope = Envelope::data(vec![json!({"id": 1})]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "data": [{"id": 1}]}));
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let value = serde_json::to_value(Envelope::message("Item deleted")).unwrap();
        assert_eq!(value, json!({"success": true, "message": "Item deleted"}));
    }

    #[test]
    fn test_failure_envelope() {
        let value = serde_json::to_value(Envelope::failure("Route not found")).unwrap();
        assert_eq!(value, json!({"success": false, "message": "Route not found"}));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ItemResponse::Created(Item::named(1, "A")).into_response().status(),
            StatusCode::CREATED
        );
        assert_eq!(ItemResponse::Deleted.into_response().status(), StatusCode::OK);
        assert_eq!(ItemError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(server_error().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
