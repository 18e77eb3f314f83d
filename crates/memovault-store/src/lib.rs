//! Key-value storage layer for the MemoVault ledger.
//!
//! Every piece of ledger state is a plain string stored under a per-user key
//! (see [`keys`]). Backends only implement [`KvStore`]; the typed accessors of
//! [`LedgerStore`] are provided for every backend.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral deployments
//! - `RocksStore`: persistent `RocksDB` database (feature `rocksdb-backend`)
//!
//! # Example
//!
//! ```
//! use memovault_core::UserId;
//! use memovault_store::{LedgerStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let user_id = UserId::new("user-1").unwrap();
//!
//! store.put_balance(&user_id, 250).unwrap();
//! assert_eq!(store.balance(&user_id).unwrap(), Some(250));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod ledger;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

use std::sync::Arc;

pub use error::{Result, StoreError};
pub use ledger::LedgerStore;
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

/// The storage trait: string values under string keys.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait KvStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
