//! Per-user ordered lists for Taskshare.
//!
//! Every user has three lists: items they own ([`ListKind::Mine`]), items
//! they sent ([`ListKind::Outgoing`]) and items they received
//! ([`ListKind::Incoming`]). An item id is expected to sit in at most one of
//! a user's lists at a time.
//!
//! # Architecture
//!
//! - [`ItemList`] is a cheap handle on one (user, kind) list. It holds no
//!   state beyond that pair and a borrowed [`ListStore`].
//! - [`resolve`] finds which list holds an item by probing mine, then
//!   outgoing, then incoming. There is no reverse index to keep in sync.
//! - [`move_item`] removes from one list and adds to another, reporting a
//!   half-finished move as an error instead of leaving it silent.
//! - [`audit_user`] and [`repair_user`] find and fix items that ended up in
//!   more than one list.
//!
//! # Example
//!
//! ```
//! use taskshare_lists::{resolve, ItemList, ListKind};
//! use taskshare_store::{InMemoryStore, ItemStore};
//! use taskshare_types::Item;
//!
//! let store = InMemoryStore::new();
//! store.put_item(&Item::new("task-1", "water the plants")).unwrap();
//! ItemList::for_owner(&store, "alice").add("task-1", "", "").unwrap();
//!
//! let found = resolve(&store, "alice", "task-1").unwrap().unwrap();
//! assert_eq!(found.kind, ListKind::Mine);
//! assert_eq!(found.position, 0);
//! assert!(resolve(&store, "alice", "task-404").unwrap().is_none());
//! ```

pub mod audit;
pub mod error;
pub mod list;
pub mod resolve;
pub mod transfer;

pub use audit::{audit_user, repair_user, AuditReport, Conflict, RepairReport};
pub use error::{ListError, Result};
pub use list::{ItemList, Located};
pub use resolve::{resolve, Placement};
pub use transfer::move_item;

pub use taskshare_store::ListStore;
pub use taskshare_types::{ExtendedItem, ListKind, OrderElement};
