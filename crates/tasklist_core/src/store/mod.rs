//! Persistent key-value store abstractions and the item codec.
//!
//! # Responsibility
//! - Define the text key-value contract the task list persists through.
//! - Provide in-memory and SQLite-backed store implementations.
//! - Isolate every store failure mode inside `ItemCodec`.
//!
//! # Invariants
//! - Only `ItemCodec` talks to a store on behalf of the task list.
//! - Store errors never escape `ItemCodec::save` / `ItemCodec::load`.

pub mod item_codec;
pub mod kv_store;
pub mod memory_store;
pub mod sqlite_store;
