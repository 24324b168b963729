//! Locating an item across a user's three lists.
//!
//! There is no reverse index from item to list. The lists are searched in
//! [`ListKind::LOOKUP_ORDER`] (mine, outgoing, incoming) and the first hit
//! wins. If an item is in more than one list the later ones are never
//! reported here; use [`audit_user`](crate::audit_user) to find those.

use std::fmt;

use tracing::debug;

use taskshare_store::ListStore;
use taskshare_types::{ListKind, OrderElement};

use crate::error::Result;
use crate::list::ItemList;

/// Where an item was found: the list holding it, its entry and position.
pub struct Placement<'a, S: ?Sized> {
    pub list: ItemList<'a, S>,
    pub element: OrderElement,
    pub position: usize,
    pub kind: ListKind,
}

impl<S: ?Sized> Clone for Placement<'_, S> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            element: self.element.clone(),
            position: self.position,
            kind: self.kind,
        }
    }
}

impl<S: ?Sized> fmt::Debug for Placement<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placement")
            .field("list", &self.list)
            .field("element", &self.element)
            .field("position", &self.position)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Find which of `user_id`'s lists holds `item_id`.
///
/// Returns `Ok(None)` when the item is in none of them. A store failure
/// during any lookup is returned as an error rather than read as absence.
pub fn resolve<'a, S: ListStore + ?Sized>(
    store: &'a S,
    user_id: &str,
    item_id: &str,
) -> Result<Option<Placement<'a, S>>> {
    for kind in ListKind::LOOKUP_ORDER {
        let list = ItemList::new(store, user_id, kind);
        if let Some(found) = list.order_for_item(item_id)? {
            debug!(user = user_id, item = item_id, list = %kind, position = found.position, "resolved item");
            return Ok(Some(Placement {
                list,
                element: found.element,
                position: found.position,
                kind,
            }));
        }
    }
    debug!(user = user_id, item = item_id, "item not in any list");
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskshare_store::{InMemoryStore, ItemStore};
    use taskshare_types::Item;

    fn store_with(ids: &[&str]) -> InMemoryStore {
        let store = InMemoryStore::new();
        for id in ids {
            store.put_item(&Item::new(*id, "x")).unwrap();
        }
        store
    }

    #[test]
    fn alice_scenario() {
        let store = store_with(&["task-1"]);
        let mine = ItemList::for_owner(&store, "alice");
        mine.add("task-1", "", "").unwrap();

        let items = mine.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "task-1");

        let found = resolve(&store, "alice", "task-1").unwrap().unwrap();
        assert_eq!(found.list, mine);
        assert_eq!(found.kind, ListKind::Mine);
        assert_eq!(found.position, 0);
        assert_eq!(found.element.foreign_item_id, "");
        assert_eq!(found.element.foreign_user_id, "");

        assert!(resolve(&store, "alice", "task-404").unwrap().is_none());
    }

    #[test]
    fn added_item_resolves_at_last_position() {
        let store = InMemoryStore::new();
        let mine = ItemList::for_owner(&store, "u");
        for id in ["a", "b", "c"] {
            mine.add(id, "", "").unwrap();
        }
        let found = resolve(&store, "u", "c").unwrap().unwrap();
        assert_eq!(found.kind, ListKind::Mine);
        assert_eq!(found.position, 2);
    }

    #[test]
    fn add_then_remove_outgoing_resolves_to_none() {
        let store = InMemoryStore::new();
        let out = ItemList::for_outgoing(&store, "u");
        out.add("t", "r", "v").unwrap();
        assert_eq!(
            resolve(&store, "u", "t").unwrap().unwrap().kind,
            ListKind::Outgoing
        );
        out.remove("t").unwrap();
        assert!(resolve(&store, "u", "t").unwrap().is_none());
    }

    #[test]
    fn mine_wins_over_outgoing() {
        let store = InMemoryStore::new();
        ItemList::for_outgoing(&store, "u").add("t", "r", "v").unwrap();
        ItemList::for_owner(&store, "u").add("t", "", "").unwrap();
        let found = resolve(&store, "u", "t").unwrap().unwrap();
        assert_eq!(found.kind, ListKind::Mine);
    }

    #[test]
    fn outgoing_wins_over_incoming() {
        let store = InMemoryStore::new();
        ItemList::for_incoming(&store, "u").add("t", "s", "w").unwrap();
        ItemList::for_outgoing(&store, "u").add("t", "r", "v").unwrap();
        let found = resolve(&store, "u", "t").unwrap().unwrap();
        assert_eq!(found.kind, ListKind::Outgoing);
        assert_eq!(found.element, OrderElement::new("t", "r", "v"));
    }

    #[test]
    fn incoming_is_found_last() {
        let store = InMemoryStore::new();
        let inc = ItemList::for_incoming(&store, "u");
        inc.add("other", "s0", "w").unwrap();
        inc.add("t", "s1", "w").unwrap();
        let found = resolve(&store, "u", "t").unwrap().unwrap();
        assert_eq!(found.kind, ListKind::Incoming);
        assert_eq!(found.position, 1);
        assert_eq!(found.list, inc);
    }

    #[test]
    fn other_users_lists_are_not_searched() {
        let store = InMemoryStore::new();
        ItemList::for_owner(&store, "bob").add("t", "", "").unwrap();
        assert!(resolve(&store, "alice", "t").unwrap().is_none());
    }
}
