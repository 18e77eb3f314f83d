//! Daily free-chat counter.

use memovault_core::{DailyCount, Result, UserId};
use memovault_store::{KvStore, LedgerStore};

use crate::ledger::Ledger;

impl<S: KvStore> Ledger<S> {
    /// Today's chat counter.
    ///
    /// A stored record from another day, or none at all, reads as a zero count for
    /// today. The read does not rewrite the stored record; the next increment does.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn daily_count(&self, user_id: &UserId) -> Result<DailyCount> {
        let today = self.clock.today();

        Ok(self
            .store
            .daily_count(user_id)?
            .filter(|count| count.is_for(today))
            .unwrap_or_else(|| DailyCount::fresh(today)))
    }

    /// Count one more chat message today and return the new count.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read or write fails.
    pub fn increment_daily_count(&self, user_id: &UserId) -> Result<u32> {
        self.with_user_lock(user_id, || self.increment_unlocked(user_id))
    }

    pub(crate) fn increment_unlocked(&self, user_id: &UserId) -> Result<u32> {
        let mut count = self.daily_count(user_id)?;
        count.count = count.count.saturating_add(1);
        self.store.put_daily_count(user_id, &count)?;

        tracing::debug!(user_id = %user_id, count = count.count, date = %count.date, "Daily chat counted");

        Ok(count.count)
    }

    /// Free chat messages left today.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn remaining_free(&self, user_id: &UserId) -> Result<u32> {
        Ok(self
            .daily_count(user_id)?
            .remaining(self.pricing.free_daily_chats))
    }

    /// Whether today's free quota is used up, so further messages cost credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub fn should_charge(&self, user_id: &UserId) -> Result<bool> {
        Ok(self
            .daily_count(user_id)?
            .exhausted(self.pricing.free_daily_chats))
    }

    /// Forget the stored counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    pub fn reset_daily_count(&self, user_id: &UserId) -> Result<()> {
        self.with_user_lock(user_id, || {
            self.store.remove_daily_count(user_id)?;
            tracing::info!(user_id = %user_id, "Daily chat counter reset");
            Ok(())
        })
    }
}
