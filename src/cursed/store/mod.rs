//! # Storage Layer
//!
//! The file-backed demos all implement [`KeyValueStore`], so their cost can be
//! compared against an in-memory map behind the same interface.
//!
//! ## Implementations
//!
//! - [`text::FileSingleton`]: `key=value` lines in `singleton.txt`, the whole
//!   file re-read and rewritten on every change. Values come back as strings.
//! - [`pickle::PickleDatabase`]: a map encoded with bincode into
//!   `database.pkl`, decoded in full on every read and re-encoded in full on
//!   every write.
//! - [`memory::InMemoryStore`]: a `BTreeMap`. The reference.
//!
//! [`node_files::FileNodeLinkedList`] is not a key/value store; it keeps one
//! file per linked-list node.
//!
//! ## Storage Format
//!
//! ```text
//! <work_dir>/run-<uuid>/
//! ├── singleton.txt       # key=value per line
//! ├── database.pkl        # bincode(BTreeMap<String, V>)
//! └── linked_list/
//!     ├── node_1.txt      # value=<int>\nnext=<file|NONE>
//!     └── node_2.txt
//! ```

use crate::error::Result;
use std::collections::BTreeMap;

pub mod memory;
pub mod node_files;
pub mod pickle;
pub mod text;

/// Minimal map interface shared by the file-backed demos and their reference.
pub trait KeyValueStore<V> {
    /// Insert or overwrite a value
    fn insert(&mut self, key: &str, value: V) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<V>>;

    /// Remove a key. Returns whether it was present.
    fn delete(&mut self, key: &str) -> Result<bool>;

    /// Every entry, ordered by key
    fn all(&self) -> Result<BTreeMap<String, V>>;

    fn clear(&mut self) -> Result<()>;

    fn len(&self) -> Result<usize> {
        Ok(self.all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
