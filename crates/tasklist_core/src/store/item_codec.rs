//! Item list codec over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole item list to one JSON blob under `STORAGE_KEY`.
//! - Decode stored blobs tolerantly and absorb every store failure.
//!
//! # Invariants
//! - `save` and `load` never return errors; failures are logged and degrade
//!   to a skipped write or an empty list.
//! - Decoded lists never contain two items with the same `id`.
//! - Titles are never written to logs.

use super::kv_store::KeyValueStore;
use crate::model::item::Item;
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Well-known slot holding the serialized item list.
pub const STORAGE_KEY: &str = "todos";

/// Result of reading the stored list once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedItems {
    /// Decoded items in stored order; empty on any failure.
    pub items: Vec<Item>,
    /// Whether the store held a non-empty value, decodable or not.
    pub had_stored_value: bool,
}

/// Best-effort persistence codec owning its backing store.
pub struct ItemCodec<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ItemCodec<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrows the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the codec and returns the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Writes the full list under `STORAGE_KEY`.
    ///
    /// Serialization and store failures are logged at `error` level and
    /// swallowed; the in-memory list stays authoritative for the session.
    pub fn save(&mut self, items: &[Item]) {
        let blob = match encode_items(items) {
            Ok(blob) => blob,
            Err(err) => {
                error!(
                    "event=todos_save module=codec status=error error_code=encode_failed count={} error={}",
                    items.len(),
                    err
                );
                return;
            }
        };

        match self.store.set_item(STORAGE_KEY, &blob) {
            Ok(()) => debug!(
                "event=todos_save module=codec status=ok count={} bytes={}",
                items.len(),
                blob.len()
            ),
            Err(err) => error!(
                "event=todos_save module=codec status=error error_code=store_write_failed count={} error={}",
                items.len(),
                err
            ),
        }
    }

    /// Reads and decodes the stored list, returning an empty list on failure.
    pub fn load(&self) -> Vec<Item> {
        self.load_snapshot().items
    }

    /// Reads the stored list and reports whether any value was present.
    pub fn load_snapshot(&self) -> LoadedItems {
        let raw = match self.store.get_item(STORAGE_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!("event=todos_load module=codec status=ok count=0 stored=false");
                return LoadedItems::default();
            }
            Err(err) => {
                error!(
                    "event=todos_load module=codec status=error error_code=store_read_failed error={}",
                    err
                );
                return LoadedItems::default();
            }
        };

        match decode_items(&raw) {
            Ok(items) => {
                debug!(
                    "event=todos_load module=codec status=ok count={} stored=true",
                    items.len()
                );
                LoadedItems {
                    items,
                    had_stored_value: true,
                }
            }
            Err(err) => {
                error!(
                    "event=todos_load module=codec status=error error_code=decode_failed bytes={} error={}",
                    raw.len(),
                    err
                );
                LoadedItems {
                    items: Vec::new(),
                    had_stored_value: true,
                }
            }
        }
    }
}

/// Serializes items to the stored JSON array shape.
pub fn encode_items(items: &[Item]) -> serde_json::Result<String> {
    serde_json::to_string(items)
}

/// Decodes a stored JSON array.
///
/// The blob must be a JSON array. Each element is decoded on its own:
/// unknown fields are ignored, a missing `completed` becomes `false`, and
/// records with a missing or malformed `id`, `title` or `createdAt` are
/// dropped. Later duplicates of an already seen `id` are dropped.
pub fn decode_items(blob: &str) -> serde_json::Result<Vec<Item>> {
    let records: Vec<Value> = serde_json::from_str(blob)?;
    let mut seen_ids = HashSet::with_capacity(records.len());
    let mut items = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let item = match serde_json::from_value::<Item>(record) {
            Ok(item) => item,
            Err(err) => {
                warn!(
                    "event=todos_load module=codec status=skipped reason=malformed_record index={} error={}",
                    index, err
                );
                continue;
            }
        };

        if !seen_ids.insert(item.id.clone()) {
            warn!(
                "event=todos_load module=codec status=skipped reason=duplicate_id index={} id={}",
                index, item.id
            );
            continue;
        }
        items.push(item);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::decode_items;

    #[test]
    fn decode_ignores_extra_fields_and_defaults_completed() {
        let items = decode_items(
            r#"[{"id":"a","title":"x","createdAt":"2024-01-01T00:00:00.000Z","color":"red"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].completed);
    }

    #[test]
    fn decode_drops_malformed_records_and_duplicates() {
        let items = decode_items(
            r#"[
                {"id":"a","title":"first","completed":false,"createdAt":"2024-01-01T00:00:00.000Z"},
                {"id":"b","completed":false,"createdAt":"2024-01-01T00:00:00.000Z"},
                {"id":"c","title":"bad date","completed":false,"createdAt":"yesterday"},
                {"id":"a","title":"dup","completed":true,"createdAt":"2024-01-02T00:00:00.000Z"},
                {"id":"d","title":"last","completed":true,"createdAt":"2024-01-03T00:00:00.000Z"}
            ]"#,
        )
        .unwrap();
        let ids = items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(items[0].title, "first");
    }

    #[test]
    fn decode_rejects_non_array_blobs() {
        assert!(decode_items("invalid json").is_err());
        assert!(decode_items(r#"{"id":"a"}"#).is_err());
    }
}
