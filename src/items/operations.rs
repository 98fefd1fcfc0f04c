//! Pure item operations
//!
//! Each function transforms an in-memory collection and never touches
//! the backing store. On error the collection is left unchanged.

use serde_json::{Map, Value};

use super::errors::{ItemError, ItemResult};
use super::item::{Collection, Item, ItemId, ID_FIELD, NAME_FIELD};

/// Items whose name contains `filter` (case-sensitive), or all items
pub fn list(items: &[Item], filter: Option<&str>) -> Vec<Item> {
    match filter {
        Some(needle) if !needle.is_empty() => items
            .iter()
            .filter(|item| item.name().is_some_and(|name| name.contains(needle)))
            .cloned()
            .collect(),
        _ => items.to_vec(),
    }
}

/// One more than the largest id in the collection, or 1 when empty
pub fn next_id(items: &[Item]) -> ItemId {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

/// Position of the item with `id`
pub fn position(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Append a new item built from `payload`
pub fn create(items: &mut Collection, payload: Map<String, Value>) -> ItemResult<Item> {
    let has_name = payload
        .get(NAME_FIELD)
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_name {
        return Err(ItemError::name_required());
    }

    let item = Item::from_payload(next_id(items), payload);
    items.push(item.clone());
    Ok(item)
}

/// Replace every field of an item except its id
pub fn replace(items: &mut Collection, id: ItemId, payload: Map<String, Value>) -> ItemResult<Item> {
    let index = position(items, id).ok_or(ItemError::NotFound)?;

    let item = Item::from_payload(id, payload);
    items[index] = item.clone();
    Ok(item)
}

/// Merge truthy payload fields into an existing item.
///
/// `null`, `false`, `0` and `""` count as absent and leave the existing
/// value in place.
pub fn patch(items: &mut Collection, id: ItemId, payload: Map<String, Value>) -> ItemResult<Item> {
    let index = position(items, id).ok_or(ItemError::NotFound)?;

    let item = &mut items[index];
    for (key, value) in payload {
        if key == ID_FIELD || !is_truthy(&value) {
            continue;
        }
        item.fields.insert(key, value);
    }
    Ok(item.clone())
}

/// Remove an item, returning it
pub fn delete(items: &mut Collection, id: ItemId) -> ItemResult<Item> {
    let index = position(items, id).ok_or(ItemError::NotFound)?;
    Ok(items.remove(index))
}

/// Whether a payload value counts as present for a patch
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
