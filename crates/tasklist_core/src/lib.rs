//! Core domain logic for the task list.
//! This crate is the single source of truth for list invariants and
//! persistence behavior; view layers only dispatch operations into it.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{create_item, generate_item_id, Item, ItemId};
pub use model::title::{validate_title, TitleValidationError, TITLE_MAX_CHARS};
pub use service::task_list_service::{ItemObserver, ListSummary, TaskListService};
pub use store::item_codec::{decode_items, encode_items, ItemCodec, LoadedItems, STORAGE_KEY};
pub use store::kv_store::{KeyValueStore, StoreError, StoreResult};
pub use store::memory_store::MemoryStore;
pub use store::sqlite_store::SqliteStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
