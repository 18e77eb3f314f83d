//! Store doubles for ledger tests.

use parking_lot::Mutex;

use memovault_store::{KvStore, MemoryStore, Result, StoreError};

/// A [`MemoryStore`] that fails one write to a key starting with `prefix`.
pub(crate) struct FailingStore {
    inner: MemoryStore,
    prefix: &'static str,
    /// Matching writes still allowed through before the failing one.
    remaining: Mutex<Option<usize>>,
}

impl FailingStore {
    /// Fail the first matching write.
    pub(crate) fn new(prefix: &'static str) -> Self {
        Self::failing_nth(prefix, 1)
    }

    /// Fail the `n`th matching write, counting from 1.
    pub(crate) fn failing_nth(prefix: &'static str, n: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            prefix,
            remaining: Mutex::new(Some(n.saturating_sub(1))),
        }
    }
}

impl KvStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if key.starts_with(self.prefix) {
            let mut remaining = self.remaining.lock();
            match *remaining {
                Some(0) => {
                    *remaining = None;
                    return Err(StoreError::Database("disk full".to_string()));
                }
                Some(n) => *remaining = Some(n - 1),
                None => {}
            }
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}
