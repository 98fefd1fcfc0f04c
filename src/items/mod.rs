//! # Items
//!
//! The item model, the pure CRUD transformations over a collection, and
//! the service that runs them against a backing store.

pub mod errors;
pub mod item;
pub mod operations;
pub mod service;

pub use errors::{ItemError, ItemResult};
pub use item::{Collection, Item, ItemId};
pub use service::ItemService;
