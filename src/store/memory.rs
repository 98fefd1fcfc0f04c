//! In-process store
//!
//! Holds the collection behind a lock for the lifetime of the process.
//! Loads hand out a copy so callers mutate their own snapshot, exactly
//! as with the file store.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use super::errors::StoreResult;
use super::ItemStore;
use crate::items::{Collection, Item};

/// Name of the item a seeded store starts with
pub const SAMPLE_ITEM_NAME: &str = "Sample Item";

/// Lock-guarded in-memory collection
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Collection>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store starting with `{id: 1, name: "Sample Item"}`
    pub fn seeded() -> Self {
        Self::with_items(vec![Item::named(1, SAMPLE_ITEM_NAME)])
    }

    pub fn with_items(items: Collection) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn load(&self) -> Collection {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn save(&self, items: &[Item]) -> StoreResult<()> {
        *self.items.write().unwrap_or_else(PoisonError::into_inner) = items.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_contains_sample() {
        let store = MemoryStore::seeded();
        assert_eq!(store.load().await, vec![Item::named(1, SAMPLE_ITEM_NAME)]);
    }

    #[tokio::test]
    async fn test_loaded_copy_is_detached() {
        let store = MemoryStore::seeded();
        let mut snapshot = store.load().await;
        snapshot.clear();

        assert_eq!(store.load().await.len(), 1);

        store.save(&snapshot).await.unwrap();
        assert!(store.load().await.is_empty());
    }
}
