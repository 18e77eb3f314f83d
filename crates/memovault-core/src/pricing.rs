//! Pricing configuration for credit-priced actions.

use serde::{Deserialize, Serialize};

use crate::quota::FREE_DAILY_CHAT_LIMIT;

/// Credits charged per chat message once the free daily quota is used up.
pub const DEFAULT_CHAT_MESSAGE_COST: i64 = 1;

/// Price of every non-default theme.
pub const THEME_PRICE: i64 = 200;

/// Memory count from which saving another memory costs credits.
pub const MEMORY_SAVE_FREE_THRESHOLD: u32 = 500;

/// Credits charged for saving a memory past the free threshold.
pub const MEMORY_SAVE_COST: i64 = 150;

/// Prices and allowances applied by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Free chat messages per calendar day.
    pub free_daily_chats: u32,

    /// Credits per chat message beyond the free quota.
    pub chat_message_cost: i64,

    /// Credits per non-default theme.
    pub theme_price: i64,

    /// Memory count from which saves are charged.
    pub memory_save_free_threshold: u32,

    /// Credits per charged memory save.
    pub memory_save_cost: i64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_daily_chats: FREE_DAILY_CHAT_LIMIT,
            chat_message_cost: DEFAULT_CHAT_MESSAGE_COST,
            theme_price: THEME_PRICE,
            memory_save_free_threshold: MEMORY_SAVE_FREE_THRESHOLD,
            memory_save_cost: MEMORY_SAVE_COST,
        }
    }
}

impl PricingConfig {
    /// Whether saving one more memory is charged, given how many the user already holds.
    #[must_use]
    pub const fn memory_save_is_charged(&self, existing_memories: u32) -> bool {
        existing_memories >= self.memory_save_free_threshold
    }
}
