//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Ledger values, keyed by the namespaced string keys of [`crate::keys`].
    pub const LEDGER: &str = "ledger";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::LEDGER]
}
