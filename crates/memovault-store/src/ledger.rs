//! Typed accessors for each ledger namespace.
//!
//! Reads return `Ok(None)` both when the key is absent and when the stored value is
//! malformed; malformed values are logged and otherwise treated as absent. Callers
//! decide the default. Backend failures are returned as errors.

use serde::de::DeserializeOwned;
use serde::Serialize;

use memovault_core::{DailyCount, Transaction, UserId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::KvStore;

/// Per-namespace get/set contracts over any [`KvStore`].
pub trait LedgerStore: KvStore {
    // =========================================================================
    // Balance
    // =========================================================================

    /// Stored balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn balance(&self, user_id: &UserId) -> Result<Option<i64>> {
        read_integer(self, &keys::credits_key(user_id))
    }

    /// Overwrite the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn put_balance(&self, user_id: &UserId, balance: i64) -> Result<()> {
        self.set(&keys::credits_key(user_id), &balance.to_string())
    }

    // =========================================================================
    // Redeemed codes
    // =========================================================================

    /// Codes the user already redeemed, in redemption order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn used_codes(&self, user_id: &UserId) -> Result<Option<Vec<String>>> {
        read_json(self, &keys::used_codes_key(user_id))
    }

    /// Overwrite the redeemed codes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn put_used_codes(&self, user_id: &UserId, codes: &[String]) -> Result<()> {
        write_json(self, &keys::used_codes_key(user_id), &codes)
    }

    // =========================================================================
    // Daily chat counter
    // =========================================================================

    /// Stored daily counter, whatever day it belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn daily_count(&self, user_id: &UserId) -> Result<Option<DailyCount>> {
        read_json(self, &keys::daily_chats_key(user_id))
    }

    /// Overwrite the daily counter.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn put_daily_count(&self, user_id: &UserId, count: &DailyCount) -> Result<()> {
        write_json(self, &keys::daily_chats_key(user_id), count)
    }

    /// Remove the daily counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn remove_daily_count(&self, user_id: &UserId) -> Result<()> {
        self.remove(&keys::daily_chats_key(user_id))
    }

    // =========================================================================
    // Transaction log
    // =========================================================================

    /// Transaction log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn transactions(&self, user_id: &UserId) -> Result<Option<Vec<Transaction>>> {
        read_json(self, &keys::credit_tx_key(user_id))
    }

    /// Overwrite the transaction log.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn put_transactions(&self, user_id: &UserId, transactions: &[Transaction]) -> Result<()> {
        write_json(self, &keys::credit_tx_key(user_id), &transactions)
    }

    // =========================================================================
    // Themes
    // =========================================================================

    /// Owned theme indices.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn owned_themes(&self, user_id: &UserId) -> Result<Option<Vec<usize>>> {
        read_json(self, &keys::themes_bought_key(user_id))
    }

    /// Overwrite the owned theme indices.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    fn put_owned_themes(&self, user_id: &UserId, themes: &[usize]) -> Result<()> {
        write_json(self, &keys::themes_bought_key(user_id), &themes)
    }

    /// Selected theme index.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    fn selected_theme(&self, user_id: &UserId) -> Result<Option<usize>> {
        read_integer(self, &keys::theme_idx_key(user_id))
    }

    /// Overwrite the selected theme index.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn put_selected_theme(&self, user_id: &UserId, index: usize) -> Result<()> {
        self.set(&keys::theme_idx_key(user_id), &index.to_string())
    }
}

impl<S: KvStore + ?Sized> LedgerStore for S {}

fn read_integer<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KvStore + ?Sized,
    T: std::str::FromStr,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            tracing::warn!(key = %key, value = %raw, "Malformed integer in store, using default");
            Ok(None)
        }
    }
}

fn read_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Malformed JSON in store, using default");
            Ok(None)
        }
    }
}

fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KvStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn absent_values_read_as_none() {
        let store = MemoryStore::new();
        let user_id = user();
        assert_eq!(store.balance(&user_id).unwrap(), None);
        assert_eq!(store.used_codes(&user_id).unwrap(), None);
        assert_eq!(store.daily_count(&user_id).unwrap(), None);
        assert_eq!(store.transactions(&user_id).unwrap(), None);
        assert_eq!(store.owned_themes(&user_id).unwrap(), None);
        assert_eq!(store.selected_theme(&user_id).unwrap(), None);
    }

    #[test]
    fn malformed_values_read_as_none() {
        let store = MemoryStore::new();
        let user_id = user();
        store.set("credits_user-1", "lots").unwrap();
        store.set("used_codes_user-1", "[not json").unwrap();
        store.set("daily_chats_user-1", "{\"count\":\"x\"}").unwrap();
        store.set("theme_idx_user-1", "-1").unwrap();

        assert_eq!(store.balance(&user_id).unwrap(), None);
        assert_eq!(store.used_codes(&user_id).unwrap(), None);
        assert_eq!(store.daily_count(&user_id).unwrap(), None);
        assert_eq!(store.selected_theme(&user_id).unwrap(), None);
    }

    #[test]
    fn balance_is_stored_as_integer_string() {
        let store = MemoryStore::new();
        let user_id = user();
        store.put_balance(&user_id, 420).unwrap();
        assert_eq!(store.get("credits_user-1").unwrap().as_deref(), Some("420"));
        assert_eq!(store.balance(&user_id).unwrap(), Some(420));
    }

    #[test]
    fn used_codes_layout() {
        let store = MemoryStore::new();
        let user_id = user();
        store
            .put_used_codes(&user_id, &["A#7f$Lp@9X".to_string()])
            .unwrap();
        assert_eq!(
            store.get("used_codes_user-1").unwrap().as_deref(),
            Some(r#"["A#7f$Lp@9X"]"#)
        );
    }

    #[test]
    fn daily_count_layout_and_removal() {
        let store = MemoryStore::new();
        let user_id = user();
        let count = DailyCount {
            count: 3,
            date: "Mon Oct 19 2026".into(),
        };
        store.put_daily_count(&user_id, &count).unwrap();
        assert_eq!(
            store.get("daily_chats_user-1").unwrap().as_deref(),
            Some(r#"{"count":3,"date":"Mon Oct 19 2026"}"#)
        );
        assert_eq!(store.daily_count(&user_id).unwrap(), Some(count));

        store.remove_daily_count(&user_id).unwrap();
        assert_eq!(store.daily_count(&user_id).unwrap(), None);
    }

    #[test]
    fn transactions_roundtrip_in_order() {
        let store = MemoryStore::new();
        let user_id = user();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let txs = vec![
            Transaction::purchase(50, at),
            Transaction::redeem(100, "A#7f$Lp@9X", at),
        ];
        store.put_transactions(&user_id, &txs).unwrap();
        assert_eq!(store.transactions(&user_id).unwrap(), Some(txs));
    }

    #[test]
    fn theme_values() {
        let store = MemoryStore::new();
        let user_id = user();
        store.put_owned_themes(&user_id, &[0, 3]).unwrap();
        store.put_selected_theme(&user_id, 3).unwrap();
        assert_eq!(store.get("themes_bought_user-1").unwrap().as_deref(), Some("[0,3]"));
        assert_eq!(store.owned_themes(&user_id).unwrap(), Some(vec![0, 3]));
        assert_eq!(store.selected_theme(&user_id).unwrap(), Some(3));
    }
}
