//! Storage backends for Taskshare.
//!
//! Each user has three ordered lists (see [`taskshare_types::ListKind`])
//! stored under `{user_id}{suffix}` keys, plus a shared item table. The
//! [`ListStore`] trait is the narrow surface the list layer builds on;
//! [`ItemStore`] holds the tasks the lists point at.
//!
//! # Storage Backends
//!
//! - [`InMemoryStore`] -- `HashMap`-backed store for tests and embedding
//! - [`FileStore`] -- single JSON document on disk, rewritten atomically
//!
//! # Design Rules
//!
//! 1. List order is insertion order; nothing here sorts.
//! 2. Adding never checks other lists. Cross-list exclusivity is the
//!    caller's job.
//! 3. Removing an absent item succeeds and reports `false`.
//! 4. Every call reads or writes the backing state; there is no cache.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
mod state;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{ItemStore, ListStore};
