use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown list key suffix: {0:?}")]
    UnknownListSuffix(String),

    #[error("unknown list kind: {0:?}")]
    UnknownListKind(String),
}
