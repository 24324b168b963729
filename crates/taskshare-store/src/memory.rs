//! In-memory store for testing and ephemeral use.
//!
//! [`InMemoryStore`] keeps items and lists in maps protected by a `RwLock`.
//! It implements both [`ListStore`] and [`ItemStore`] and is suitable for
//! unit tests and for embedding behind a host that persists elsewhere.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use taskshare_types::{ExtendedItem, Item, ListKind, OrderElement};

use crate::error::{StoreError, StoreResult};
use crate::state::StoreState;
use crate::traits::{ItemStore, ListStore};

/// An in-memory implementation of [`ListStore`] and [`ItemStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items.
    pub fn item_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.items.len())
    }

    /// Storage keys of all non-empty lists, sorted.
    pub fn list_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read()?.lists.keys().cloned().collect())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl ListStore for InMemoryStore {
    fn get_item_list_for_user(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<ExtendedItem>> {
        self.read()?.extended_items(user_id, kind)
    }

    fn add_to_list_for_user(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
        foreign_item_id: &str,
        foreign_user_id: &str,
    ) -> StoreResult<()> {
        let element = OrderElement::new(item_id, foreign_item_id, foreign_user_id);
        self.write()?.push(user_id, kind, element);
        Ok(())
    }

    fn remove_from_list_for_user(&self, user_id: &str, item_id: &str, kind: ListKind) -> StoreResult<bool> {
        Ok(self.write()?.remove(user_id, item_id, kind))
    }

    fn get_order_for_item(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
    ) -> StoreResult<Option<(OrderElement, usize)>> {
        Ok(self.read()?.order_for_item(user_id, item_id, kind))
    }

    fn get_order_list(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<OrderElement>> {
        Ok(self.read()?.order_list(user_id, kind).to_vec())
    }

    fn is_referenced(&self, item_id: &str) -> StoreResult<bool> {
        Ok(self.read()?.is_referenced(item_id))
    }
}

impl ItemStore for InMemoryStore {
    fn put_item(&self, item: &Item) -> StoreResult<()> {
        self.write()?.items.insert(item.id.clone(), item.clone());
        Ok(())
    }

    fn get_item(&self, item_id: &str) -> StoreResult<Option<Item>> {
        Ok(self.read()?.items.get(item_id).cloned())
    }

    fn delete_item(&self, item_id: &str) -> StoreResult<bool> {
        Ok(self.write()?.items.remove(item_id).is_some())
    }
}
