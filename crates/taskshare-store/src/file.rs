//! File-backed store.
//!
//! The whole state lives in one JSON document. It is read once at open and
//! rewritten on every mutation by writing a temporary file next to it and
//! renaming it into place, so a crash leaves either the old or the new
//! document on disk.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use taskshare_types::{ExtendedItem, Item, ListKind, OrderElement};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::state::StoreState;
use crate::traits::{ItemStore, ListStore};

/// A [`ListStore`] and [`ItemStore`] persisted to a single JSON file.
///
/// Writers are serialized within the process. Two processes writing the
/// same file race with last-write-wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    pretty: bool,
    state: RwLock<StoreState>,
}

impl FileStore {
    /// Open the store at `path`. A missing file opens as an empty store and
    /// is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::from_config(&StoreConfig::at(path.as_ref()))
    }

    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let path = config.data_path.clone();
        let state = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoreState::default(),
            Err(e) => return Err(e.into()),
        };
        info!(
            path = %path.display(),
            items = state.items.len(),
            lists = state.lists.len(),
            "opened file store"
        );
        Ok(Self {
            path,
            pretty: config.pretty,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Apply `f` to a copy of the state and persist it if `f` reports a
    /// change. The in-memory state is only replaced once the file is written.
    fn mutate<T>(&self, f: impl FnOnce(&mut StoreState) -> (T, bool)) -> StoreResult<T> {
        let mut guard = self
            .state
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let mut next = guard.clone();
        let (out, changed) = f(&mut next);
        if changed {
            self.persist(&next)?;
            *guard = next;
        }
        Ok(out)
    }

    fn persist(&self, state: &StoreState) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(state)
        } else {
            serde_json::to_vec(state)
        }
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tmp.write_all(&encoded)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        debug!(path = %self.path.display(), bytes = encoded.len(), "persisted store");
        Ok(())
    }
}

impl ListStore for FileStore {
    fn get_item_list_for_user(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<ExtendedItem>> {
        self.read()?.extended_items(user_id, kind)
    }

    fn add_to_list_for_user(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
        foreign_item_id: &str,
        foreign_user_id: &str,
    ) -> StoreResult<()> {
        let element = OrderElement::new(item_id, foreign_item_id, foreign_user_id);
        self.mutate(|state| {
            state.push(user_id, kind, element);
            ((), true)
        })
    }

    fn remove_from_list_for_user(&self, user_id: &str, item_id: &str, kind: ListKind) -> StoreResult<bool> {
        self.mutate(|state| {
            let removed = state.remove(user_id, item_id, kind);
            (removed, removed)
        })
    }

    fn get_order_for_item(
        &self,
        user_id: &str,
        item_id: &str,
        kind: ListKind,
    ) -> StoreResult<Option<(OrderElement, usize)>> {
        Ok(self.read()?.order_for_item(user_id, item_id, kind))
    }

    fn get_order_list(&self, user_id: &str, kind: ListKind) -> StoreResult<Vec<OrderElement>> {
        Ok(self.read()?.order_list(user_id, kind).to_vec())
    }

    fn is_referenced(&self, item_id: &str) -> StoreResult<bool> {
        Ok(self.read()?.is_referenced(item_id))
    }
}

impl ItemStore for FileStore {
    fn put_item(&self, item: &Item) -> StoreResult<()> {
        self.mutate(|state| {
            state.items.insert(item.id.clone(), item.clone());
            ((), true)
        })
    }

    fn get_item(&self, item_id: &str) -> StoreResult<Option<Item>> {
        Ok(self.read()?.items.get(item_id).cloned())
    }

    fn delete_item(&self, item_id: &str) -> StoreResult<bool> {
        self.mutate(|state| {
            let existed = state.items.remove(item_id).is_some();
            (existed, existed)
        })
    }
}
