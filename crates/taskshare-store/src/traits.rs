use taskshare_types::{ExtendedItem, Item, ListKind, OrderElement};

use crate::error::StoreResult;

/// Ordered per-user list storage.
///
/// All implementations must satisfy these invariants:
/// - Lists keep insertion order. Removal preserves the relative order of the
///   remaining entries.
/// - `add_to_list_for_user` appends without looking at the user's other
///   lists. Keeping an item in at most one list is up to the caller.
/// - Removing an item that is not in the list is not an error.
/// - Every call goes to the backing state; results are never cached.
pub trait ListStore: Send + Sync {
    /// Load the items of a user's list, in list order.
    ///
    /// Entries that reference a counterpart user carry the counterpart's
    /// current list for the foreign item. Returns `Err` if an entry points
    /// at an item missing from the item store.
    fn get_item_list_for_user(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<ExtendedItem>>;

    /// Append an entry for `item_id` to the end of a user's list.
    fn add_to_list_for_user(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
        foreign_item_id: &str,
        foreign_user_id: &str,
    ) -> StoreResult<()>;

    /// Remove the entry for `item_id` from a user's list.
    ///
    /// Returns `Ok(true)` if the entry existed and was removed, `Ok(false)`
    /// if the list did not contain it.
    fn remove_from_list_for_user(&self, user_id: &str, item_id: &str, kind: ListKind) -> StoreResult<bool>;

    /// Find the entry for `item_id` in a user's list.
    ///
    /// Returns the entry and its zero-based position, or `Ok(None)` if the
    /// list does not contain it.
    fn get_order_for_item(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
    ) -> StoreResult<Option<(OrderElement, usize)>>;

    /// The raw entries of a user's list, in list order.
    fn get_order_list(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<OrderElement>>;

    /// Returns `true` if any list of any user has an entry for `item_id`.
    fn is_referenced(&self, item_id: &str) -> StoreResult<bool>;
}

/// Storage for the tasks that lists point at.
pub trait ItemStore: Send + Sync {
    /// Create or overwrite an item by id.
    fn put_item(&self, item: &Item) -> StoreResult<()>;

    /// Read an item by id. Returns `Ok(None)` if it does not exist.
    fn get_item(&self, item_id: &str) -> StoreResult<Option<Item>>;

    /// Delete an item by id. Returns `true` if the item existed.
    ///
    /// List entries pointing at the item are left alone; remove them first.
    fn delete_item(&self, item_id: &str) -> StoreResult<bool>;
}
