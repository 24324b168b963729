//! Error types for list operations.

use taskshare_store::StoreError;
use taskshare_types::ListKind;
use thiserror::Error;

/// Errors that can occur during list operations.
#[derive(Debug, Error)]
pub enum ListError {
    /// The storage backend failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A move was requested for an item that is not in the source list.
    #[error("item {item_id} is not in {user_id}'s {kind} list")]
    NotInList {
        user_id: String,
        item_id: String,
        kind: ListKind,
    },

    /// Source and destination of a move belong to different users.
    #[error("cannot move between users: {from_user} -> {to_user}")]
    CrossUserMove { from_user: String, to_user: String },

    /// Source and destination of a move are the same list.
    #[error("item {item_id} is already in {user_id}'s {kind} list")]
    SameList {
        user_id: String,
        item_id: String,
        kind: ListKind,
    },

    /// The item was removed from the source list but could not be added to
    /// the destination. `restored` tells whether it was put back at the end
    /// of the source list; if not, the item is in neither list.
    #[error("moving {item_id} from {from} to {to} failed after removal (restored: {restored}): {source}")]
    PartialMove {
        item_id: String,
        from: ListKind,
        to: ListKind,
        restored: bool,
        source: StoreError,
    },
}

/// Convenience type alias for list operations.
pub type Result<T> = std::result::Result<T, ListError>;
