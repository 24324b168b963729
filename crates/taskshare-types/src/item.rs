//! Stored tasks and their list-view projection.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::list_kind::ListKind;

/// A task as stored in the item store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub description: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub create_at: i64,
}

impl Item {
    /// Create an item stamped with the current time.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            description: String::new(),
            create_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// An item as it appears in one of a user's lists.
///
/// `foreign_user` is the counterpart of a shared item and `foreign_list` is
/// the list the counterpart currently keeps their copy in. Both are empty for
/// items in the owner's own list, and `foreign_list` is `None` when the
/// counterpart no longer holds the item anywhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedItem {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "user", default)]
    pub foreign_user: String,
    #[serde(rename = "list", default)]
    pub foreign_list: Option<ListKind>,
}

impl ExtendedItem {
    pub fn local(item: Item) -> Self {
        Self {
            item,
            foreign_user: String::new(),
            foreign_list: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }
}
