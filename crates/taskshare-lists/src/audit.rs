//! Consistency checks over a user's three lists.
//!
//! Moves are not atomic, so a crash or a concurrent writer can leave an item
//! in two lists at once. [`audit_user`] reports such items and
//! [`repair_user`] keeps each one in the list [`resolve`](crate::resolve)
//! would report and removes it from the others.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use taskshare_store::ListStore;
use taskshare_types::ListKind;

use crate::error::Result;
use crate::list::ItemList;

/// An item found in more than one of a user's lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub item_id: String,
    /// The lists holding the item, in lookup order. The first one is the
    /// list the resolver reports.
    pub kinds: Vec<ListKind>,
}

impl Conflict {
    /// The list the item is kept in on repair, if any list was recorded.
    pub fn winner(&self) -> Option<ListKind> {
        self.kinds.first().copied()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub user_id: String,
    /// Conflicting items, sorted by item id.
    pub conflicts: Vec<Conflict>,
}

impl AuditReport {
    pub fn is_consistent(&self) -> bool {
        self.conflicts.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    /// Entries removed, as (item id, list it was removed from).
    pub removed: Vec<(String, ListKind)>,
}

/// Find items that sit in more than one of `user_id`'s lists.
pub fn audit_user<S: ListStore + ?Sized>(store: &S, user_id: &str) -> Result<AuditReport> {
    let mut seen: BTreeMap<String, Vec<ListKind>> = BTreeMap::new();
    for kind in ListKind::LOOKUP_ORDER {
        for element in store.get_order_list(user_id, kind)? {
            let kinds = seen.entry(element.item_id).or_default();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }

    let conflicts: Vec<Conflict> = seen
        .into_iter()
        .filter(|(_, kinds)| kinds.len() > 1)
        .map(|(item_id, kinds)| Conflict { item_id, kinds })
        .collect();

    for conflict in &conflicts {
        warn!(
            user = user_id,
            item = %conflict.item_id,
            lists = ?conflict.kinds,
            "item present in more than one list"
        );
    }

    Ok(AuditReport {
        user_id: user_id.to_string(),
        conflicts,
    })
}

/// Remove every conflicting item from all but its highest-priority list.
pub fn repair_user<S: ListStore + ?Sized>(store: &S, user_id: &str) -> Result<RepairReport> {
    let audit = audit_user(store, user_id)?;
    let mut report = RepairReport::default();
    for conflict in &audit.conflicts {
        for &kind in conflict.kinds.iter().skip(1) {
            if ItemList::new(store, user_id, kind).remove(&conflict.item_id)? {
                report.removed.push((conflict.item_id.clone(), kind));
            }
        }
    }
    if !report.removed.is_empty() {
        info!(user = user_id, removed = report.removed.len(), "repaired lists");
    }
    Ok(report)
}
