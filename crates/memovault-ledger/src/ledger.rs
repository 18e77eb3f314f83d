//! Balance, redemption and transaction-log operations.

use std::sync::Arc;

use memovault_core::{
    redeem_amount, LedgerError, PricingConfig, Result, Transaction, UserId, MAX_PURCHASE_CREDITS,
    MIN_PURCHASE_CREDITS,
};
use memovault_store::{KvStore, LedgerStore};

use crate::clock::{Clock, SystemClock};
use crate::locks::UserLocks;

/// Outcome of a successful redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    /// Credits granted by the code.
    pub amount: i64,
    /// Balance after the credit.
    pub balance: i64,
}

/// The credits ledger over a key-value store.
///
/// Absent or malformed values read as their defaults: balance 0, no used codes, an
/// empty transaction log.
pub struct Ledger<S> {
    pub(crate) store: S,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) pricing: PricingConfig,
    locks: UserLocks,
}

impl<S: KvStore> Ledger<S> {
    /// Create a ledger with the system clock and default pricing.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            pricing: PricingConfig::default(),
            locks: UserLocks::default(),
        }
    }

    /// Replace the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the pricing.
    #[must_use]
    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// The pricing in effect.
    #[must_use]
    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run `f` while holding `user_id`'s lock.
    pub(crate) fn with_user_lock<T>(
        &self,
        user_id: &UserId,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let lock = self.locks.for_user(user_id);
        let _guard = lock.lock();
        f()
    }

    // =========================================================================
    // Balance
    // =========================================================================

    /// Current balance, 0 when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn balance(&self, user_id: &UserId) -> Result<i64> {
        Ok(self.store.balance(user_id)?.unwrap_or(0))
    }

    /// Overwrite the balance. The value is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn set_balance(&self, user_id: &UserId, balance: i64) -> Result<()> {
        self.with_user_lock(user_id, || {
            self.store.put_balance(user_id, balance)?;
            tracing::info!(user_id = %user_id, balance, "Balance set");
            Ok(())
        })
    }

    /// Add `amount` to the balance and return the new balance.
    ///
    /// The amount is not validated; a negative amount lowers the balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails.
    pub fn add_credits(&self, user_id: &UserId, amount: i64) -> Result<i64> {
        self.with_user_lock(user_id, || self.add_unlocked(user_id, amount))
    }

    /// Subtract `amount` from the balance, clamping at zero, and return the new balance.
    ///
    /// Insufficient balance is not an error. Callers that must refuse the action check
    /// the balance first, or use a spending operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails.
    pub fn deduct_credits(&self, user_id: &UserId, amount: i64) -> Result<i64> {
        self.with_user_lock(user_id, || {
            let balance = self.balance(user_id)?;
            let new_balance = balance.saturating_sub(amount).max(0);
            self.store.put_balance(user_id, new_balance)?;

            tracing::info!(
                user_id = %user_id,
                amount,
                balance = new_balance,
                clamped = balance.saturating_sub(amount) < 0,
                "Credits deducted"
            );

            Ok(new_balance)
        })
    }

    fn add_unlocked(&self, user_id: &UserId, amount: i64) -> Result<i64> {
        let new_balance = self.balance(user_id)?.saturating_add(amount);
        self.store.put_balance(user_id, new_balance)?;

        tracing::info!(user_id = %user_id, amount, balance = new_balance, "Credits added");

        Ok(new_balance)
    }

    // =========================================================================
    // Redeem codes
    // =========================================================================

    /// Redeem a single-use code.
    ///
    /// Returns the credits granted and the resulting balance, or `None` if the code
    /// is unknown or the user has already redeemed it; state is untouched in that
    /// case. Surrounding whitespace is ignored.
    ///
    /// The code is marked used before the balance changes. A failed write can
    /// therefore lose a credit but never grant one twice.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read or write fails.
    pub fn redeem_code(&self, user_id: &UserId, code: &str) -> Result<Option<Redemption>> {
        let code = code.trim();

        let Some(amount) = redeem_amount(code) else {
            tracing::debug!(user_id = %user_id, "Unknown redeem code");
            return Ok(None);
        };

        self.with_user_lock(user_id, || {
            let mut used = self.used_codes(user_id)?;
            if used.iter().any(|c| c == code) {
                tracing::debug!(user_id = %user_id, "Redeem code already used");
                return Ok(None);
            }

            used.push(code.to_string());
            self.store.put_used_codes(user_id, &used)?;
            let balance = self.add_unlocked(user_id, amount)?;
            self.append_unlocked(user_id, Transaction::redeem(amount, code, self.clock.now()))?;

            tracing::info!(user_id = %user_id, amount, balance, "Redeem code applied");

            Ok(Some(Redemption { amount, balance }))
        })
    }

    /// Codes the user has redeemed, in redemption order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn used_codes(&self, user_id: &UserId) -> Result<Vec<String>> {
        Ok(self.store.used_codes(user_id)?.unwrap_or_default())
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// The transaction log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn transactions(&self, user_id: &UserId) -> Result<Vec<Transaction>> {
        Ok(self.store.transactions(user_id)?.unwrap_or_default())
    }

    /// Prepend a transaction to the user's log. The log is never trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails.
    pub fn record_transaction(&self, user_id: &UserId, transaction: Transaction) -> Result<()> {
        self.with_user_lock(user_id, || self.append_unlocked(user_id, transaction))
    }

    pub(crate) fn append_unlocked(&self, user_id: &UserId, transaction: Transaction) -> Result<()> {
        let mut log = self.transactions(user_id)?;
        log.insert(0, transaction);
        self.store.put_transactions(user_id, &log)?;
        Ok(())
    }

    /// Buy credits: add `amount` and log a purchase. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if `amount` is outside
    /// `MIN_PURCHASE_CREDITS..=MAX_PURCHASE_CREDITS`, or an error if the store fails.
    pub fn purchase_credits(&self, user_id: &UserId, amount: i64) -> Result<i64> {
        if !(MIN_PURCHASE_CREDITS..=MAX_PURCHASE_CREDITS).contains(&amount) {
            return Err(LedgerError::InvalidAmount(format!(
                "purchase must be between {MIN_PURCHASE_CREDITS} and {MAX_PURCHASE_CREDITS} credits, got {amount}"
            )));
        }

        self.with_user_lock(user_id, || {
            let balance = self.add_unlocked(user_id, amount)?;
            self.append_unlocked(user_id, Transaction::purchase(amount, self.clock.now()))?;

            tracing::info!(user_id = %user_id, amount, balance, "Credits purchased");

            Ok(balance)
        })
    }

    // =========================================================================
    // Spending
    // =========================================================================

    /// Deduct `amount` for `item` if the balance covers it, and log the spend.
    /// Must be called with the user's lock held.
    pub(crate) fn spend_unlocked(&self, user_id: &UserId, amount: i64, item: &str) -> Result<i64> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(format!(
                "spend amount must be positive, got {amount}"
            )));
        }

        let balance = self.balance(user_id)?;
        if balance < amount {
            return Err(LedgerError::InsufficientCredits {
                balance,
                required: amount,
            });
        }

        let new_balance = balance - amount;
        self.store.put_balance(user_id, new_balance)?;
        self.append_unlocked(user_id, Transaction::spend(amount, item, self.clock.now()))?;

        tracing::info!(user_id = %user_id, amount, item, balance = new_balance, "Credits spent");

        Ok(new_balance)
    }
}
