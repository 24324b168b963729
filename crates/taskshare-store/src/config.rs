use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the file-backed store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON document holding items and lists.
    pub data_path: PathBuf,
    /// Write the document indented instead of compact.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("taskshare.json"),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// A default configuration pointing at `data_path`.
    pub fn at(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }
}
