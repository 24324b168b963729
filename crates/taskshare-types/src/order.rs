use serde::{Deserialize, Serialize};

/// One entry in a user's ordered list.
///
/// The foreign fields point at the same task as seen from the counterpart
/// user: for an outgoing entry they name the receiver's copy, for an incoming
/// entry the sender's. Entries in the owner's own list leave them empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderElement {
    /// The item this entry orders.
    pub item_id: String,
    /// The item's identifier on the counterpart side, or empty.
    #[serde(default)]
    pub foreign_item_id: String,
    /// The counterpart user, or empty.
    #[serde(default)]
    pub foreign_user_id: String,
}

impl OrderElement {
    pub fn new(
        item_id: impl Into<String>,
        foreign_item_id: impl Into<String>,
        foreign_user_id: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            foreign_item_id: foreign_item_id.into(),
            foreign_user_id: foreign_user_id.into(),
        }
    }

    /// An entry with no counterpart, as used by the owner's own list.
    pub fn local(item_id: impl Into<String>) -> Self {
        Self::new(item_id, "", "")
    }

    /// Returns `true` if this entry references a counterpart user.
    pub fn has_counterpart(&self) -> bool {
        !self.foreign_user_id.is_empty()
    }
}
