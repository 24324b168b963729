//! Error types for storage operations.

use thiserror::Error;

/// Errors from list and item storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A list entry points at an item that is not in the item store.
    #[error("list {list_key} references missing item {item_id}")]
    DanglingReference { list_key: String, item_id: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding the store state was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
