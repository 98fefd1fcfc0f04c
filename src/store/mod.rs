//! Backing store for the item collection
//!
//! A store only knows how to read the whole collection and write the
//! whole collection back:
//! - `load` never fails; absent or unusable data is an empty collection
//! - `save` replaces everything and reports failures

mod errors;
mod file;
mod memory;

use async_trait::async_trait;

pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::{MemoryStore, SAMPLE_ITEM_NAME};

use crate::items::{Collection, Item};

/// Whole-collection persistence
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Read the current collection
    async fn load(&self) -> Collection;

    /// Replace the persisted collection
    async fn save(&self, items: &[Item]) -> StoreResult<()>;

    /// Short label for logs
    fn describe(&self) -> String;
}
