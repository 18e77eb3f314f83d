//! Key layout.
//!
//! Each namespace is a fixed prefix followed by the user identifier, e.g.
//! `credits_kX9bQ2mZ`. The prefixes are part of the persisted format.

use memovault_core::UserId;

/// Balance, integer string.
pub const CREDITS_PREFIX: &str = "credits_";

/// Redeemed codes, JSON array of strings.
pub const USED_CODES_PREFIX: &str = "used_codes_";

/// Daily chat counter, JSON `{count, date}`.
pub const DAILY_CHATS_PREFIX: &str = "daily_chats_";

/// Transaction log, JSON array newest first.
pub const CREDIT_TX_PREFIX: &str = "credit_tx_";

/// Owned theme indices, JSON array of integers.
pub const THEMES_BOUGHT_PREFIX: &str = "themes_bought_";

/// Selected theme index, integer string.
pub const THEME_IDX_PREFIX: &str = "theme_idx_";

fn user_key(prefix: &str, user_id: &UserId) -> String {
    let mut key = String::with_capacity(prefix.len() + user_id.as_str().len());
    key.push_str(prefix);
    key.push_str(user_id.as_str());
    key
}

/// Key of a user's balance.
#[must_use]
pub fn credits_key(user_id: &UserId) -> String {
    user_key(CREDITS_PREFIX, user_id)
}

/// Key of a user's redeemed codes.
#[must_use]
pub fn used_codes_key(user_id: &UserId) -> String {
    user_key(USED_CODES_PREFIX, user_id)
}

/// Key of a user's daily chat counter.
#[must_use]
pub fn daily_chats_key(user_id: &UserId) -> String {
    user_key(DAILY_CHATS_PREFIX, user_id)
}

/// Key of a user's transaction log.
#[must_use]
pub fn credit_tx_key(user_id: &UserId) -> String {
    user_key(CREDIT_TX_PREFIX, user_id)
}

/// Key of a user's owned themes.
#[must_use]
pub fn themes_bought_key(user_id: &UserId) -> String {
    user_key(THEMES_BOUGHT_PREFIX, user_id)
}

/// Key of a user's selected theme.
#[must_use]
pub fn theme_idx_key(user_id: &UserId) -> String {
    user_key(THEME_IDX_PREFIX, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_formats() {
        let user_id = UserId::new("abc123").unwrap();
        assert_eq!(credits_key(&user_id), "credits_abc123");
        assert_eq!(used_codes_key(&user_id), "used_codes_abc123");
        assert_eq!(daily_chats_key(&user_id), "daily_chats_abc123");
        assert_eq!(credit_tx_key(&user_id), "credit_tx_abc123");
        assert_eq!(themes_bought_key(&user_id), "themes_bought_abc123");
        assert_eq!(theme_idx_key(&user_id), "theme_idx_abc123");
    }

    #[test]
    fn keys_are_per_user() {
        let a = UserId::new("a").unwrap();
        let b = UserId::new("b").unwrap();
        assert_ne!(credits_key(&a), credits_key(&b));
    }
}
