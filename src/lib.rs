//! flatcrud - A minimal JSON item service over a flat file
//!
//! - `items`: item model, CRUD transformations and the service running them
//! - `store`: whole-collection persistence (JSON file or memory)
//! - `http_server`: Axum routes, response envelope and CORS handling
//! - `cli`: `init` and `serve` commands

pub mod cli;
pub mod http_server;
pub mod items;
pub mod store;
