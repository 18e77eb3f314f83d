//! Premium charges: chat messages past the free quota and memory saves past the free
//! allowance.

use serde::Serialize;

use memovault_core::{Result, UserId};
use memovault_store::KvStore;

use crate::ledger::Ledger;

/// Outcome of counting one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCharge {
    /// Whether the message was charged.
    pub charged: bool,
    /// Credits charged (0 when free).
    pub cost: i64,
    /// Messages counted today, this one included.
    pub daily_count: u32,
    /// Free messages left today.
    pub remaining_free: u32,
    /// Balance after the charge.
    pub balance: i64,
}

/// Outcome of charging a memory save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryCharge {
    /// Whether the save was charged.
    pub charged: bool,
    /// Credits charged (0 when free).
    pub cost: i64,
    /// Balance after the charge.
    pub balance: i64,
}

impl<S: KvStore> Ledger<S> {
    /// Count a chat message, charging for it once today's free quota is used up.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientCredits` when the message must be charged and
    /// the balance does not cover it; the counter is not incremented in that case.
    pub fn record_chat_message(&self, user_id: &UserId) -> Result<ChatCharge> {
        self.with_user_lock(user_id, || {
            let limit = self.pricing.free_daily_chats;
            let charged = self.daily_count(user_id)?.exhausted(limit);

            let (cost, balance) = if charged {
                let cost = self.pricing.chat_message_cost;
                (cost, self.spend_unlocked(user_id, cost, "chat_message")?)
            } else {
                (0, self.balance(user_id)?)
            };

            let daily_count = self.increment_unlocked(user_id)?;

            Ok(ChatCharge {
                charged,
                cost,
                daily_count,
                remaining_free: limit.saturating_sub(daily_count),
                balance,
            })
        })
    }

    /// Charge for saving a memory when the user already holds `existing_memories`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientCredits` when the save must be charged and the
    /// balance does not cover it.
    pub fn charge_memory_save(&self, user_id: &UserId, existing_memories: u32) -> Result<MemoryCharge> {
        if !self.pricing.memory_save_is_charged(existing_memories) {
            return Ok(MemoryCharge {
                charged: false,
                cost: 0,
                balance: self.balance(user_id)?,
            });
        }

        self.with_user_lock(user_id, || {
            let cost = self.pricing.memory_save_cost;
            let balance = self.spend_unlocked(user_id, cost, "memory_save")?;

            Ok(MemoryCharge {
                charged: true,
                cost,
                balance,
            })
        })
    }
}
