//! Item record
//!
//! An item is a system-assigned integer `id` plus an open set of JSON
//! fields. `name` is the only field the service interprets; everything
//! else is carried through as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Item identifier
pub type ItemId = u64;

/// The full ordered set of items, persisted as one unit
pub type Collection = Vec<Item>;

/// Field names the service interprets
pub const ID_FIELD: &str = "id";
pub const NAME_FIELD: &str = "name";

/// A single item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    /// All fields other than `id`, including `name`
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Build an item from a client payload. Any `id` in the payload is discarded.
    pub fn from_payload(id: ItemId, mut payload: Map<String, Value>) -> Self {
        payload.remove(ID_FIELD);
        Self {
            id,
            fields: payload,
        }
    }

    /// Build an item with only a name
    pub fn named(id: ItemId, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(NAME_FIELD.to_string(), Value::String(name.into()));
        Self { id, fields }
    }

    /// The item's name, if it has a string one
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_FIELD).and_then(Value::as_str)
    }

    /// Look up any field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_id_is_discarded() {
        let payload = json!({"id": 42, "name": "Widget"});
        let item = Item::from_payload(7, payload.as_object().unwrap().clone());

        assert_eq!(item.id, 7);
        assert!(item.field("id").is_none());
        assert_eq!(item.name(), Some("Widget"));
    }

    #[test]
    fn test_serializes_flat() {
        let mut item = Item::named(1, "Sample");
        item.fields.insert("body".to_string(), json!("x"));

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"id": 1, "name": "Sample", "body": "x"}));
    }

    #[test]
    fn test_deserializes_extra_fields() {
        let item: Item = serde_json::from_value(json!({"id": 3, "name": "A", "tags": [1, 2]})).unwrap();

        assert_eq!(item.id, 3);
        assert_eq!(item.field("tags"), Some(&json!([1, 2])));
        assert!(item.field("id").is_none());
    }

    #[test]
    fn test_non_string_name() {
        let item: Item = serde_json::from_value(json!({"id": 1, "name": 5})).unwrap();
        assert_eq!(item.name(), None);
    }
}
