//! Item service
//!
//! Runs each operation as one load → transform → save cycle against the
//! backing store. Nothing is cached between calls, so every request sees
//! the latest persisted collection. Concurrent mutations are not
//! serialized; the last save wins.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::errors::{ItemError, ItemResult};
use super::item::{Item, ItemId};
use super::operations;
use crate::store::ItemStore;

/// CRUD over a single item collection
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub async fn list(&self, filter: Option<&str>) -> Vec<Item> {
        let items = self.store.load().await;
        operations::list(&items, filter)
    }

    pub async fn create(&self, body: &[u8]) -> ItemResult<Item> {
        let mut items = self.store.load().await;
        let payload = parse_object(body)?;

        let item = operations::create(&mut items, payload)?;
        self.store.save(&items).await?;

        tracing::debug!(id = item.id, "item created");
        Ok(item)
    }

    /// Existence is checked before the body is parsed.
    pub async fn replace(&self, id: ItemId, body: &[u8]) -> ItemResult<Item> {
        let mut items = self.store.load().await;
        operations::position(&items, id).ok_or(ItemError::NotFound)?;
        let payload = parse_object(body)?;

        let item = operations::replace(&mut items, id, payload)?;
        self.store.save(&items).await?;

        tracing::debug!(id, "item replaced");
        Ok(item)
    }

    /// Existence is checked before the body is parsed.
    pub async fn patch(&self, id: ItemId, body: &[u8]) -> ItemResult<Item> {
        let mut items = self.store.load().await;
        operations::position(&items, id).ok_or(ItemError::NotFound)?;
        let payload = parse_object(body)?;

        let item = operations::patch(&mut items, id, payload)?;
        self.store.save(&items).await?;

        tracing::debug!(id, "item patched");
        Ok(item)
    }

    pub async fn delete(&self, id: ItemId) -> ItemResult<()> {
        let mut items = self.store.load().await;

        operations::delete(&mut items, id)?;
        self.store.save(&items).await?;

        tracing::debug!(id, "item deleted");
        Ok(())
    }
}

/// Parse a request body into a JSON object
pub fn parse_object(body: &[u8]) -> ItemResult<Map<String, Value>> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ItemError::MalformedBody(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ItemError::object_required()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn service() -> ItemService {
        ItemService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = service();
        let created = service.create(br#"{"name":"Sample"}"#).await.unwrap();

        assert_eq!(created, Item::named(1, "Sample"));
        assert_eq!(service.list(None).await, vec![Item::named(1, "Sample")]);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let service = service();
        service.create(br#"{"name":"A"}"#).await.unwrap();
        service.create(br#"{"name":"B"}"#).await.unwrap();

        assert_eq!(service.list(None).await, service.list(None).await);
    }

    #[tokio::test]
    async fn test_ids_are_distinct_and_increasing() {
        let service = service();
        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let body = json!({ "name": name }).to_string();
            ids.push(service.create(body.as_bytes()).await.unwrap().id);
        }
        service.delete(2).await.unwrap();
        ids.push(service.create(br#"{"name":"e"}"#).await.unwrap().id);

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let err = service().create(b"{not json").await.unwrap_err();
        assert!(matches!(err, ItemError::MalformedBody(_)));
    }

    #[tokio::test]
    async fn test_non_object_body() {
        let err = service().create(b"[1,2]").await.unwrap_err();
        assert!(matches!(err, ItemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_not_found_wins_over_bad_body() {
        let service = service();
        let err = service.replace(9999, b"garbage").await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound));

        let err = service.patch(9999, b"garbage").await.unwrap_err();
        assert!(matches!(err, ItemError::NotFound));
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_persist() {
        let service = service();
        service.create(br#"{"name":"A"}"#).await.unwrap();

        assert!(service.delete(9999).await.is_err());
        assert!(service.create(br#"{"name":""}"#).await.is_err());
        assert_eq!(service.list(None).await, vec![Item::named(1, "A")]);
    }
}
