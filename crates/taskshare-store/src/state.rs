//! The key-value state shared by every backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taskshare_types::{list_key, ExtendedItem, Item, ListKind, OrderElement};

use crate::error::{StoreError, StoreResult};

/// Items by id and ordered lists by storage key.
///
/// Empty lists are dropped from `lists` so the document only carries keys
/// that hold entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoreState {
    #[serde(default)]
    pub items: BTreeMap<String, Item>,
    #[serde(default)]
    pub lists: BTreeMap<String, Vec<OrderElement>>,
}

impl StoreState {
    pub fn order_list(&self, user_id: &str, kind: ListKind) -> &[OrderElement] {
        self.lists
            .get(&list_key(user_id, kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn order_for_item(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
    ) -> Option<(OrderElement, usize)> {
        self.order_list(user_id, kind)
            .iter()
            .enumerate()
            .find(|(_, oe)| oe.item_id == item_id)
            .map(|(n, oe)| (oe.clone(), n))
    }

    /// First list holding `item_id` for `user_id`, in lookup order.
    fn list_kind_of(&self, user_id: &str, item_id: &str) -> Option<ListKind> {
        ListKind::LOOKUP_ORDER
            .into_iter()
            .find(|kind| self.order_for_item(user_id, item_id, *kind).is_some())
    }

    pub fn extended_items(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<ExtendedItem>> {
        self.order_list(user_id, kind)
            .iter()
            .map(|oe| {
                let item = self.items.get(&oe.item_id).cloned().ok_or_else(|| {
                    StoreError::DanglingReference {
                        list_key: list_key(user_id, kind),
                        item_id: oe.item_id.clone(),
                    }
                })?;
                if !oe.has_counterpart() {
                    return Ok(ExtendedItem::local(item));
                }
                Ok(ExtendedItem {
                    item,
                    foreign_user: oe.foreign_user_id.clone(),
                    foreign_list: self.list_kind_of(&oe.foreign_user_id, &oe.foreign_item_id),
                })
            })
            .collect()
    }

    pub fn is_referenced(&self, item_id: &str) -> bool {
        self.lists
            .values()
            .any(|list| list.iter().any(|oe| oe.item_id == item_id))
    }

    pub fn push(&mut self, user_id: &str, kind: ListKind, element: OrderElement) {
        self.lists
            .entry(list_key(user_id, kind))
            .or_default()
            .push(element);
    }

    pub fn remove(&mut self, user_id: &str, item_id: &str, kind: ListKind) -> bool {
        let key = list_key(user_id, kind);
        let Some(list) = self.lists.get_mut(&key) else {
            return false;
        };
        let Some(n) = list.iter().position(|oe| oe.item_id == item_id) else {
            return false;
        };
        list.remove(n);
        if list.is_empty() {
            self.lists.remove(&key);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.into(),
            message: format!("message {id}"),
            description: String::new(),
            create_at: 0,
        }
    }

    #[test]
    fn remove_drops_empty_lists() {
        let mut state = StoreState::default();
        state.push("alice", ListKind::Incoming, OrderElement::new("t", "f", "bob"));
        assert!(state.lists.contains_key("alice_in"));
        assert!(state.remove("alice", "t", ListKind::Incoming));
        assert!(state.lists.is_empty());
        assert!(!state.remove("alice", "t", ListKind::Incoming));
    }

    #[test]
    fn foreign_list_follows_counterpart() {
        let mut state = StoreState::default();
        state.items.insert("a1".into(), item("a1"));
        state.items.insert("b1".into(), item("b1"));
        state.push("alice", ListKind::Outgoing, OrderElement::new("a1", "b1", "bob"));
        state.push("bob", ListKind::Incoming, OrderElement::new("b1", "a1", "alice"));

        let items = state.extended_items("alice", ListKind::Outgoing).unwrap();
        assert_eq!(items[0].foreign_user, "bob");
        assert_eq!(items[0].foreign_list, Some(ListKind::Incoming));

        // Bob accepts: the copy moves to his own list.
        state.remove("bob", "b1", ListKind::Incoming);
        state.push("bob", ListKind::Mine, OrderElement::local("b1"));
        let items = state.extended_items("alice", ListKind::Outgoing).unwrap();
        assert_eq!(items[0].foreign_list, Some(ListKind::Mine));

        state.remove("bob", "b1", ListKind::Mine);
        let items = state.extended_items("alice", ListKind::Outgoing).unwrap();
        assert_eq!(items[0].foreign_list, None);
    }

    #[test]
    fn references_span_users_and_lists() {
        let mut state = StoreState::default();
        assert!(!state.is_referenced("t"));
        state.push("alice", ListKind::Mine, OrderElement::local("t"));
        state.push("bob", ListKind::Incoming, OrderElement::new("t", "t", "alice"));
        state.remove("alice", "t", ListKind::Mine);
        assert!(state.is_referenced("t"));
        state.remove("bob", "t", ListKind::Incoming);
        assert!(!state.is_referenced("t"));
    }

    #[test]
    fn dangling_entry_is_an_error() {
        let mut state = StoreState::default();
        state.push("alice", ListKind::Mine, OrderElement::local("ghost"));
        let err = state.extended_items("alice", ListKind::Mine).unwrap_err();
        assert!(
            matches!(err, StoreError::DanglingReference { ref item_id, .. } if item_id == "ghost"),
            "expected DanglingReference, got: {err}"
        );
    }
}
