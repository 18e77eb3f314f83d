//! Request and response types for the MemoVault client.

use serde::{Deserialize, Serialize};

use memovault_core::Transaction;

/// Balance response.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    /// Credit balance.
    pub balance: i64,
    /// Free chat messages left today.
    pub free_chats_remaining: u32,
}

/// A page of the transaction log.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<Transaction>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// Purchase request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PurchaseRequest {
    pub amount: i64,
}

/// Redeem request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RedeemRequest<'a> {
    pub code: &'a str,
}

/// Memory-save charge request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChargeMemoryRequest {
    pub existing_memories: u32,
}

/// Result of a purchase or redemption.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    /// Credits granted.
    pub amount: i64,
    /// Balance afterwards.
    pub balance: i64,
}

/// Today's chat quota.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaResponse {
    /// Messages counted today.
    pub daily_count: u32,
    /// The day the count applies to.
    pub date: String,
    /// Free messages per day.
    pub free_limit: u32,
    /// Free messages left today.
    pub remaining_free: u32,
    /// Whether the next message costs credits.
    pub should_charge: bool,
}

/// Outcome of counting a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChargeResponse {
    /// Whether the message was charged.
    pub charged: bool,
    /// Credits charged.
    pub cost: i64,
    /// Messages counted today.
    pub daily_count: u32,
    /// Free messages left today.
    pub remaining_free: u32,
    /// Balance afterwards.
    pub balance: i64,
}

/// Outcome of a memory-save charge.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryChargeResponse {
    /// Whether the save was charged.
    pub charged: bool,
    /// Credits charged.
    pub cost: i64,
    /// Balance afterwards.
    pub balance: i64,
}

/// A theme as seen by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeInfo {
    /// Catalog index.
    pub index: usize,
    /// Display name.
    pub name: String,
    /// Price in credits.
    pub price: i64,
    /// Whether the caller owns it.
    pub owned: bool,
    /// Whether it is the caller's active theme.
    pub selected: bool,
}

/// The theme catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemesResponse {
    /// Every theme.
    pub themes: Vec<ThemeInfo>,
    /// Active theme index.
    pub selected: usize,
}

/// Result of buying a theme.
#[derive(Debug, Clone, Deserialize)]
pub struct BuyThemeResponse {
    /// The bought theme.
    pub index: usize,
    /// Balance afterwards.
    pub balance: i64,
}

/// Result of selecting a theme.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectThemeResponse {
    /// Active theme index.
    pub selected: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
