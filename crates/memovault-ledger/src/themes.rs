//! Theme ownership and selection.

use serde::Serialize;

use memovault_core::{find_theme, LedgerError, Result, UserId, DEFAULT_THEME_INDEX, THEMES};
use memovault_store::{KvStore, LedgerStore};

use crate::ledger::Ledger;

/// A catalog entry as seen by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeStatus {
    /// Catalog index.
    pub index: usize,
    /// Display name.
    pub name: &'static str,
    /// Credits needed to buy it (0 for the default theme).
    pub price: i64,
    /// Whether the user owns it.
    pub owned: bool,
    /// Whether it is the user's active theme.
    pub selected: bool,
}

impl<S: KvStore> Ledger<S> {
    /// Owned theme indices. Every user owns the default theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn owned_themes(&self, user_id: &UserId) -> Result<Vec<usize>> {
        let mut owned = self
            .store
            .owned_themes(user_id)?
            .unwrap_or_else(|| vec![DEFAULT_THEME_INDEX]);

        if !owned.contains(&DEFAULT_THEME_INDEX) {
            owned.insert(0, DEFAULT_THEME_INDEX);
        }

        Ok(owned)
    }

    /// The active theme index, the default theme when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn selected_theme(&self, user_id: &UserId) -> Result<usize> {
        Ok(self
            .store
            .selected_theme(user_id)?
            .filter(|idx| find_theme(*idx).is_some())
            .unwrap_or(DEFAULT_THEME_INDEX))
    }

    /// The full catalog annotated for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn theme_catalog(&self, user_id: &UserId) -> Result<Vec<ThemeStatus>> {
        let owned = self.owned_themes(user_id)?;
        let selected = self.selected_theme(user_id)?;

        Ok(THEMES
            .iter()
            .map(|theme| ThemeStatus {
                index: theme.index,
                name: theme.name,
                price: self.theme_price(theme.index),
                owned: owned.contains(&theme.index),
                selected: theme.index == selected,
            })
            .collect())
    }

    /// Buy a theme with credits and return the new balance.
    ///
    /// Ownership is stored before the charge. If the charge then fails without
    /// touching the balance, ownership is revoked again.
    ///
    /// # Errors
    ///
    /// - `LedgerError::UnknownTheme` if `index` is outside the catalog.
    /// - `LedgerError::ThemeAlreadyOwned` if the user owns it.
    /// - `LedgerError::InsufficientCredits` if the balance is below the price.
    pub fn buy_theme(&self, user_id: &UserId, index: usize) -> Result<i64> {
        let theme = find_theme(index).ok_or(LedgerError::UnknownTheme { index })?;

        self.with_user_lock(user_id, || {
            let mut owned = self.owned_themes(user_id)?;
            if owned.contains(&index) {
                return Err(LedgerError::ThemeAlreadyOwned { index });
            }

            let price = self.theme_price(index);
            let balance = self.balance(user_id)?;
            if balance < price {
                return Err(LedgerError::InsufficientCredits {
                    balance,
                    required: price,
                });
            }

            let previous = owned.clone();
            owned.push(index);
            self.store.put_owned_themes(user_id, &owned)?;

            let item = format!("theme:{}", theme.name);
            let balance = match self.spend_unlocked(user_id, price, &item) {
                Ok(balance) => balance,
                Err(err) => {
                    self.revoke_unpaid_theme(user_id, &previous, balance);
                    return Err(err);
                }
            };

            tracing::info!(user_id = %user_id, theme = theme.name, balance, "Theme bought");

            Ok(balance)
        })
    }

    /// Make an owned theme the active one.
    ///
    /// # Errors
    ///
    /// - `LedgerError::UnknownTheme` if `index` is outside the catalog.
    /// - `LedgerError::ThemeNotOwned` if the user does not own it.
    pub fn select_theme(&self, user_id: &UserId, index: usize) -> Result<()> {
        if find_theme(index).is_none() {
            return Err(LedgerError::UnknownTheme { index });
        }

        self.with_user_lock(user_id, || {
            if !self.owned_themes(user_id)?.contains(&index) {
                return Err(LedgerError::ThemeNotOwned { index });
            }

            self.store.put_selected_theme(user_id, index)?;
            tracing::debug!(user_id = %user_id, index, "Theme selected");
            Ok(())
        })
    }

    fn revoke_unpaid_theme(&self, user_id: &UserId, previous: &[usize], balance_before: i64) {
        match self.balance(user_id) {
            Ok(balance) if balance == balance_before => {
                if let Err(e) = self.store.put_owned_themes(user_id, previous) {
                    tracing::error!(user_id = %user_id, error = %e, "Failed to revoke unpaid theme");
                }
            }
            Ok(_) => {
                tracing::warn!(user_id = %user_id, "Theme charged but spend not fully recorded");
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to read balance after theme charge");
            }
        }
    }

    fn theme_price(&self, index: usize) -> i64 {
        if index == DEFAULT_THEME_INDEX {
            0
        } else {
            self.pricing.theme_price
        }
    }
}
