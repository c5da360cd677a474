//! Task list state manager.
//!
//! # Responsibility
//! - Hold the session's ordered item list (most recent first).
//! - Apply add/toggle/delete and persist the full list after each one.
//! - Notify subscribers with a fresh snapshot after each mutation.
//!
//! # Invariants
//! - The list is loaded exactly once, in `initialize`, before any mutation.
//! - After every mutating call returns, the stored blob equals the list.
//! - Lookup misses in `toggle`/`delete` are no-ops, never errors.
//! - Titles are not validated here; see `model::title::validate_title`.

use crate::model::item::{create_item, Item};
use crate::store::item_codec::ItemCodec;
use crate::store::kv_store::KeyValueStore;
use log::{debug, info};

/// Callback receiving the list after every mutation.
pub type ItemObserver = Box<dyn FnMut(&[Item]) + Send>;

/// Counts backing the "N of M tasks remaining" footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListSummary {
    /// Items not yet completed.
    pub remaining: usize,
    /// All items.
    pub total: usize,
}

/// Session-scoped owner of the task list.
pub struct TaskListService<S: KeyValueStore> {
    codec: ItemCodec<S>,
    items: Vec<Item>,
    observers: Vec<ItemObserver>,
}

impl<S: KeyValueStore> TaskListService<S> {
    /// Loads the stored list and starts a session.
    ///
    /// # Side effects
    /// - Re-saves the list when the store already held a value, which also
    ///   replaces an undecodable blob with the recovered list. An untouched
    ///   store stays untouched.
    pub fn initialize(mut codec: ItemCodec<S>) -> Self {
        let loaded = codec.load_snapshot();
        if loaded.had_stored_value {
            codec.save(&loaded.items);
        }
        info!(
            "event=task_list_init module=service status=ok count={} resaved={}",
            loaded.items.len(),
            loaded.had_stored_value
        );

        Self {
            codec,
            items: loaded.items,
            observers: Vec::new(),
        }
    }

    /// Read-only view of the current list.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Owned copy of the current list.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            remaining: self.items.iter().filter(|item| !item.completed).count(),
            total: self.items.len(),
        }
    }

    /// Registers an observer called with the list after each mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&[Item]) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Borrows the persistence codec.
    pub fn codec(&self) -> &ItemCodec<S> {
        &self.codec
    }

    /// Ends the session and hands back the backing store.
    pub fn into_store(self) -> S {
        self.codec.into_store()
    }

    /// Prepends a new item built from `title` and persists the list.
    pub fn add(&mut self, title: &str) -> &Item {
        let item = create_item(title);
        debug!("event=task_add module=service status=ok id={}", item.id);
        self.items.insert(0, item);
        self.commit();
        &self.items[0]
    }

    /// Flips `completed` on the matching item and persists the list.
    ///
    /// Returns whether an item matched.
    pub fn toggle(&mut self, id: &str) -> bool {
        let found = match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                *item = item.toggled();
                debug!(
                    "event=task_toggle module=service status=ok id={} completed={}",
                    id, item.completed
                );
                true
            }
            None => {
                debug!("event=task_toggle module=service status=noop id={id}");
                false
            }
        };
        self.commit();
        found
    }

    /// Removes the matching item and persists the list.
    ///
    /// Returns whether an item was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        debug!(
            "event=task_delete module=service status={} id={}",
            if removed { "ok" } else { "noop" },
            id
        );
        self.commit();
        removed
    }

    fn commit(&mut self) {
        self.codec.save(&self.items);
        for observer in &mut self.observers {
            observer(&self.items);
        }
    }
}
