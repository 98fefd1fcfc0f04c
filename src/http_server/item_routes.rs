//! Item HTTP Routes
//!
//! - `GET    /items`       list, optional `?name=` substring filter
//! - `POST   /items`       create
//! - `PUT    /items/:id`   full replace
//! - `PATCH  /items/:id`   partial update
//! - `DELETE /items/:id`   delete
//!
//! Any other method on these paths is "Route not found", never 405.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Router,
};

use super::response::ItemResponse;
use crate::items::{ItemError, ItemId, ItemService};

/// Item state shared across handlers
pub type ItemState = Arc<ItemService>;

/// Query pairs in request order; repeated keys are kept
pub type ListQuery = Vec<(String, String)>;

/// Create item routes
pub fn item_routes(service: ItemState) -> Router {
    Router::new()
        .route(
            "/items",
            get(list_items_handler)
                .post(create_item_handler)
                .fallback(route_not_found),
        )
        .route(
            "/items/:id",
            put(replace_item_handler)
                .patch(patch_item_handler)
                .delete(delete_item_handler)
                .fallback(route_not_found),
        )
        .with_state(service)
}

/// Fallback for unmatched method or path
pub async fn route_not_found() -> ItemError {
    ItemError::RouteNotFound
}

// ==================
// Extractor Rejections
// ==================

/// A segment that does not even decode matches no item
impl From<PathRejection> for ItemError {
    fn from(_: PathRejection) -> Self {
        ItemError::NotFound
    }
}

impl From<QueryRejection> for ItemError {
    fn from(rejection: QueryRejection) -> Self {
        ItemError::Validation(rejection.body_text())
    }
}

impl From<BytesRejection> for ItemError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ItemError::PayloadTooLarge
        } else {
            ItemError::MalformedBody(rejection.body_text())
        }
    }
}

/// Ids that are not integers match no item
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<ItemId, ItemError> {
    let Path(raw) = path?;
    raw.parse().map_err(|_| ItemError::NotFound)
}

/// First `name` value, as `URLSearchParams::get` would pick it
fn name_filter(query: &ListQuery) -> Option<&str> {
    query
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str())
}

// ==================
// Handlers
// ==================

async fn list_items_handler(
    State(service): State<ItemState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ItemResponse, ItemError> {
    let Query(query) = query?;
    Ok(ItemResponse::Listed(service.list(name_filter(&query)).await))
}

async fn create_item_handler(
    State(service): State<ItemState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ItemResponse, ItemError> {
    let item = service.create(&body?).await?;
    Ok(ItemResponse::Created(item))
}

async fn replace_item_handler(
    State(service): State<ItemState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ItemResponse, ItemError> {
    let item = service.replace(parse_id(path)?, &body?).await?;
    Ok(ItemResponse::Replaced(item))
}

async fn patch_item_handler(
    State(service): State<ItemState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<ItemResponse, ItemError> {
    let item = service.patch(parse_id(path)?, &body?).await?;
    Ok(ItemResponse::Patched(item))
}

async fn delete_item_handler(
    State(service): State<ItemState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<ItemResponse, ItemError> {
    service.delete(parse_id(path)?).await?;
    Ok(ItemResponse::Deleted)
}
