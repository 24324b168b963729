//! The three list kinds every user has, and the storage keys they map to.
//!
//! The key suffixes are part of the persisted key namespace. Changing any of
//! them orphans every list already written under the old key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Key suffix for the list of items the user owns.
pub const MY_LIST_SUFFIX: &str = "";
/// Key suffix for the list of items the user received.
pub const IN_LIST_SUFFIX: &str = "_in";
/// Key suffix for the list of items the user sent.
pub const OUT_LIST_SUFFIX: &str = "_out";

/// One of a user's three ordered lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Items the user owns.
    Mine,
    /// Items other users sent to this user.
    Incoming,
    /// Items this user sent to other users.
    Outgoing,
}

impl ListKind {
    /// Order in which lists are searched when locating an item.
    pub const LOOKUP_ORDER: [ListKind; 3] = [ListKind::Mine, ListKind::Outgoing, ListKind::Incoming];

    /// The storage key suffix for this list kind.
    pub fn key_suffix(self) -> &'static str {
        match self {
            Self::Mine => MY_LIST_SUFFIX,
            Self::Incoming => IN_LIST_SUFFIX,
            Self::Outgoing => OUT_LIST_SUFFIX,
        }
    }

    /// Parse a storage key suffix back into a list kind.
    pub fn from_suffix(suffix: &str) -> Result<Self, TypeError> {
        match suffix {
            MY_LIST_SUFFIX => Ok(Self::Mine),
            IN_LIST_SUFFIX => Ok(Self::Incoming),
            OUT_LIST_SUFFIX => Ok(Self::Outgoing),
            other => Err(TypeError::UnknownListSuffix(other.to_string())),
        }
    }

    /// Human-readable name: `mine`, `incoming` or `outgoing`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }

    /// Returns `true` for the lists that reference a counterpart user.
    pub fn is_shared(self) -> bool {
        !matches!(self, Self::Mine)
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ListKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mine" | "my" => Ok(Self::Mine),
            "incoming" | "in" => Ok(Self::Incoming),
            "outgoing" | "out" => Ok(Self::Outgoing),
            other => Err(TypeError::UnknownListKind(other.to_string())),
        }
    }
}

/// Storage key of `user`'s list of the given kind.
///
/// The owner's own list is stored under the bare user id. Keys are a plain
/// concatenation, so a user id ending in `_in` or `_out` shares keys with
/// another user's shared lists: `alice_in`'s own list is `alice`'s incoming
/// list. User ids must not end in either suffix.
pub fn list_key(user_id: &str, kind: ListKind) -> String {
    format!("{user_id}{}", kind.key_suffix())
}
