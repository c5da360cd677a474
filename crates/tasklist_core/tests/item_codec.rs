use chrono::{TimeZone, Utc};
use tasklist_core::{
    create_item, Item, ItemCodec, KeyValueStore, MemoryStore, SqliteStore, StoreError,
    StoreResult, STORAGE_KEY,
};

/// Store double whose reads and/or writes always fail.
#[derive(Default)]
struct FailingStore {
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl KeyValueStore for FailingStore {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("store closed".to_string()));
        }
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        self.writes += 1;
        if self.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        Ok(())
    }

    fn remove_item(&mut self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

#[test]
fn save_then_load_roundtrips_every_field() {
    let items = vec![
        create_item("Walk dog"),
        Item {
            completed: true,
            ..create_item("Buy milk")
        },
        stored_item("test-1", "Stored todo", true),
    ];

    let mut codec = ItemCodec::new(MemoryStore::new());
    codec.save(&items);

    assert_eq!(codec.load(), items);
}

#[test]
fn roundtrip_through_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos.db");
    let items = vec![create_item("persist me"), stored_item("a", "older", true)];

    let mut codec = ItemCodec::new(SqliteStore::open(&path).unwrap());
    codec.save(&items);
    drop(codec);

    let codec = ItemCodec::new(SqliteStore::open(&path).unwrap());
    assert_eq!(codec.load(), items);
}

#[test]
fn save_writes_json_array_under_todos_key() {
    let mut codec = ItemCodec::new(MemoryStore::new());
    codec.save(&[stored_item("test-1", "Stored todo", false)]);

    let raw = codec.store().get_item(STORAGE_KEY).unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([{
            "id": "test-1",
            "title": "Stored todo",
            "completed": false,
            "createdAt": "2024-01-01T00:00:00.000Z"
        }])
    );
}

#[test]
fn load_parses_externally_written_blob() {
    let blob = serde_json::json!([{
        "id": "test-1",
        "title": "Stored todo",
        "completed": true,
        "createdAt": "2024-01-01T00:00:00.000Z"
    }])
    .to_string();
    let codec = ItemCodec::new(MemoryStore::with_entry(STORAGE_KEY, blob));

    let items = codec.load();
    assert_eq!(items, vec![stored_item("test-1", "Stored todo", true)]);
}

#[test]
fn absent_or_empty_value_loads_empty_without_presence() {
    let absent = ItemCodec::new(MemoryStore::new()).load_snapshot();
    assert!(absent.items.is_empty());
    assert!(!absent.had_stored_value);

    let empty = ItemCodec::new(MemoryStore::with_entry(STORAGE_KEY, "")).load_snapshot();
    assert!(empty.items.is_empty());
    assert!(!empty.had_stored_value);
}

#[test]
fn invalid_json_loads_empty_but_reports_presence() {
    let codec = ItemCodec::new(MemoryStore::with_entry(STORAGE_KEY, "invalid json"));

    let loaded = codec.load_snapshot();
    assert!(loaded.items.is_empty());
    assert!(loaded.had_stored_value);
}

#[test]
fn schema_mismatch_loads_empty() {
    let codec = ItemCodec::new(MemoryStore::with_entry(STORAGE_KEY, r#"{"todos":[]}"#));
    assert!(codec.load().is_empty());
}

#[test]
fn read_failure_loads_empty() {
    let codec = ItemCodec::new(FailingStore {
        fail_reads: true,
        ..FailingStore::default()
    });

    let loaded = codec.load_snapshot();
    assert!(loaded.items.is_empty());
    assert!(!loaded.had_stored_value);
}

#[test]
fn write_failure_is_swallowed() {
    let mut codec = ItemCodec::new(FailingStore {
        fail_writes: true,
        ..FailingStore::default()
    });

    codec.save(&[create_item("Test todo")]);
    assert_eq!(codec.store().writes, 1);
}

#[test]
fn save_replaces_previous_blob() {
    let mut codec = ItemCodec::new(MemoryStore::new());
    codec.save(&[create_item("first")]);
    codec.save(&[]);

    assert_eq!(
        codec.store().get_item(STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
    assert!(codec.load().is_empty());
}

fn stored_item(id: &str, title: &str, completed: bool) -> Item {
    Item {
        id: id.to_string(),
        title: title.to_string(),
        completed,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}
