//! # Item HTTP Server Module
//!
//! JSON-over-HTTP access to the item collection, built on Axum.
//!
//! # Endpoints
//!
//! - `/items` - list and create
//! - `/items/:id` - replace, patch and delete
//!
//! Every response carries permissive CORS headers; `OPTIONS` on any path
//! answers `204`.

pub mod config;
pub mod cors;
pub mod item_routes;
pub mod response;
pub mod server;

pub use config::{ConfigError, ServerConfig, StorageBackend};
pub use response::{Envelope, ItemResponse};
pub use server::HttpServer;
