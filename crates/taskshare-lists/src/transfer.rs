//! Moving an item from one of a user's lists to another.
//!
//! A move is two store writes: remove from the source, then append to the
//! destination. The store offers no transaction spanning both, so a failure
//! of the second write is reported as [`ListError::PartialMove`] after an
//! attempt to put the item back.

use tracing::{debug, warn};

use taskshare_store::ListStore;

use crate::error::{ListError, Result};
use crate::list::ItemList;

/// Move `item_id` from `source` to the end of `destination`.
///
/// The destination entry is created with the given foreign fields. Both
/// lists must belong to the same user and differ in kind; moving within one
/// list fails with [`ListError::SameList`] without writing. Fails with
/// [`ListError::NotInList`] without writing anything if the item is not in
/// `source`.
pub fn move_item<S: ListStore + ?Sized>(
    source: &ItemList<'_, S>,
    destination: &ItemList<'_, S>,
    item_id: &str,
    foreign_item_id: &str,
    foreign_user_id: &str,
) -> Result<()> {
    if source.user_id() != destination.user_id() {
        return Err(ListError::CrossUserMove {
            from_user: source.user_id().to_string(),
            to_user: destination.user_id().to_string(),
        });
    }

    if source.kind() == destination.kind() {
        return Err(ListError::SameList {
            user_id: source.user_id().to_string(),
            item_id: item_id.to_string(),
            kind: source.kind(),
        });
    }

    let Some(original) = source.order_for_item(item_id)? else {
        return Err(ListError::NotInList {
            user_id: source.user_id().to_string(),
            item_id: item_id.to_string(),
            kind: source.kind(),
        });
    };

    if !source.remove(item_id)? {
        // Someone else removed it between the lookup and the removal.
        return Err(ListError::NotInList {
            user_id: source.user_id().to_string(),
            item_id: item_id.to_string(),
            kind: source.kind(),
        });
    }

    let added = destination.store().add_to_list_for_user(
        destination.user_id(),
        item_id,
        destination.kind(),
        foreign_item_id,
        foreign_user_id,
    );
    if let Err(source_err) = added {
        let element = original.element;
        let restored = source
            .add(item_id, &element.foreign_item_id, &element.foreign_user_id)
            .is_ok();
        warn!(
            user = source.user_id(),
            item = item_id,
            from = %source.kind(),
            to = %destination.kind(),
            restored,
            error = %source_err,
            "move failed after removal"
        );
        return Err(ListError::PartialMove {
            item_id: item_id.to_string(),
            from: source.kind(),
            to: destination.kind(),
            restored,
            source: source_err,
        });
    }

    debug!(
        user = source.user_id(),
        item = item_id,
        from = %source.kind(),
        to = %destination.kind(),
        "moved item"
    );
    Ok(())
}
