//! The [`ItemList`] handle on one of a user's lists.

use std::fmt;

use tracing::debug;

use taskshare_store::ListStore;
use taskshare_types::{ExtendedItem, ListKind, OrderElement};

use crate::error::Result;

/// An entry found in a list, with its zero-based position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Located {
    pub element: OrderElement,
    pub position: usize,
}

/// Handle on one (user, list kind) list.
///
/// The handle is a plain value: it carries the identifying pair and a
/// borrowed store, and every operation goes straight to the store. Two
/// handles for the same pair compare equal and are interchangeable.
pub struct ItemList<'a, S: ?Sized> {
    store: &'a S,
    user_id: String,
    kind: ListKind,
}

impl<'a, S: ListStore + ?Sized> ItemList<'a, S> {
    pub fn new(store: &'a S, user_id: impl Into<String>, kind: ListKind) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            kind,
        }
    }

    /// The list of items `user_id` owns.
    pub fn for_owner(store: &'a S, user_id: impl Into<String>) -> Self {
        Self::new(store, user_id, ListKind::Mine)
    }

    /// The list of items `user_id` received from other users.
    pub fn for_incoming(store: &'a S, user_id: impl Into<String>) -> Self {
        Self::new(store, user_id, ListKind::Incoming)
    }

    /// The list of items `user_id` sent to other users.
    pub fn for_outgoing(store: &'a S, user_id: impl Into<String>) -> Self {
        Self::new(store, user_id, ListKind::Outgoing)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    /// The items in this list, in list order.
    pub fn items(&self) -> Result<Vec<ExtendedItem>> {
        Ok(self.store.get_item_list_for_user(&self.user_id, self.kind)?)
    }

    /// Append `item_id` to the end of this list.
    ///
    /// Does not look at the user's other lists; remove the item from
    /// wherever it was first, or use [`move_item`](crate::move_item).
    pub fn add(&self, item_id: &str, foreign_item_id: &str, foreign_user_id: &str) -> Result<()> {
        self.store.add_to_list_for_user(
            &self.user_id,
            item_id,
            self.kind,
            foreign_item_id,
            foreign_user_id,
        )?;
        debug!(user = %self.user_id, list = %self.kind, item = item_id, "added to list");
        Ok(())
    }

    /// Remove `item_id` from this list.
    ///
    /// Returns `Ok(false)` if the item was not in the list, which leaves the
    /// list unchanged.
    pub fn remove(&self, item_id: &str) -> Result<bool> {
        let removed = self
            .store
            .remove_from_list_for_user(&self.user_id, item_id, self.kind)?;
        debug!(user = %self.user_id, list = %self.kind, item = item_id, removed, "removed from list");
        Ok(removed)
    }

    /// Find `item_id` in this list. Absence is `Ok(None)`.
    pub fn order_for_item(&self, item_id: &str) -> Result<Option<Located>> {
        let found = self
            .store
            .get_order_for_item(&self.user_id, item_id, self.kind)?;
        Ok(found.map(|(element, position)| Located { element, position }))
    }
}

impl<S: ?Sized> Clone for ItemList<'_, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            user_id: self.user_id.clone(),
            kind: self.kind,
        }
    }
}

impl<S: ?Sized> PartialEq for ItemList<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.kind == other.kind
    }
}

impl<S: ?Sized> Eq for ItemList<'_, S> {}

impl<S: ?Sized> fmt::Debug for ItemList<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemList")
            .field("user_id", &self.user_id)
            .field("kind", &self.kind)
            .finish()
    }
}
