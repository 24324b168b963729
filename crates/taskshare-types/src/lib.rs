//! Foundation types for Taskshare.
//!
//! Every user owns three ordered lists of item references: the items they
//! own, the items they sent to others, and the items they received. This
//! crate defines the values stored in and read back from those lists.
//!
//! # Key Types
//!
//! - [`ListKind`] — Which of a user's three lists (mine, incoming, outgoing)
//! - [`OrderElement`] — One entry in an ordered list
//! - [`Item`] — A stored task
//! - [`ExtendedItem`] — An item enriched with its counterpart information

pub mod error;
pub mod item;
pub mod list_kind;
pub mod order;

pub use error::TypeError;
pub use item::{ExtendedItem, Item};
pub use list_kind::{list_key, ListKind};
pub use order::OrderElement;
