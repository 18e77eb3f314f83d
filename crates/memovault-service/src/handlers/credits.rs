//! Credit balance, transaction, purchase and redeem handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use memovault_core::Transaction;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Largest page the transaction list returns.
const MAX_PAGE_SIZE: usize = 100;

/// Balance response.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Credit balance.
    pub balance: i64,
    /// Free chat messages left today.
    pub free_chats_remaining: u32,
}

/// Get current credit balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<BalanceResponse>, ApiError> {
    Ok(Json(BalanceResponse {
        balance: state.ledger.balance(&auth.user_id)?,
        free_chats_remaining: state.ledger.remaining_free(&auth.user_id)?,
    }))
}

/// Transaction list query parameters.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Maximum number of transactions to return (default: 50, max: 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Offset for pagination (default: 0).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// List transactions response.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    /// Transactions (newest first).
    pub transactions: Vec<Transaction>,
    /// Whether there are more transactions.
    pub has_more: bool,
}

/// List transaction history.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<ListTransactionsResponse>, ApiError> {
    let limit = query.limit.min(MAX_PAGE_SIZE);
    let log = state.ledger.transactions(&auth.user_id)?;

    let has_more = log.len() > query.offset.saturating_add(limit);
    let transactions = log.into_iter().skip(query.offset).take(limit).collect();

    Ok(Json(ListTransactionsResponse {
        transactions,
        has_more,
    }))
}

/// Purchase credits request.
#[derive(Debug, Deserialize)]
pub struct PurchaseCreditsRequest {
    /// Credits to buy.
    pub amount: i64,
}

/// Balance-changing response.
#[derive(Debug, Serialize)]
pub struct CreditsResponse {
    /// Credits granted.
    pub amount: i64,
    /// Balance afterwards.
    pub balance: i64,
}

/// Buy credits.
pub async fn purchase_credits(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<PurchaseCreditsRequest>,
) -> Result<Json<CreditsResponse>, ApiError> {
    let balance = state.ledger.purchase_credits(&auth.user_id, body.amount)?;

    Ok(Json(CreditsResponse {
        amount: body.amount,
        balance,
    }))
}

/// Redeem code request.
#[derive(Debug, Deserialize)]
pub struct RedeemCodeRequest {
    /// The code to redeem.
    pub code: String,
}

/// Redeem a single-use code.
pub async fn redeem_code(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<RedeemCodeRequest>,
) -> Result<Json<CreditsResponse>, ApiError> {
    let redemption = state
        .ledger
        .redeem_code(&auth.user_id, &body.code)?
        .ok_or(ApiError::InvalidCode)?;

    Ok(Json(CreditsResponse {
        amount: redemption.amount,
        balance: redemption.balance,
    }))
}
