//! Task-list domain model.
//!
//! # Responsibility
//! - Define the canonical `Item` record and its factory.
//! - Define the title validation contract used by form boundaries.
//!
//! # Invariants
//! - Every item is identified by a generated `ItemId` that never changes.
//! - `completed` is the only field mutated after creation.

pub mod item;
pub mod title;
