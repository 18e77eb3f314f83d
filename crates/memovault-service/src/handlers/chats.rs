//! Daily chat quota handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use memovault_ledger::ChatCharge;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Quota response.
#[derive(Debug, Serialize)]
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

/// Get today's chat quota.
pub async fn get_quota(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<QuotaResponse>, ApiError> {
    let free_limit = state.ledger.pricing().free_daily_chats;
    let count = state.ledger.daily_count(&auth.user_id)?;

    Ok(Json(QuotaResponse {
        daily_count: count.count,
        remaining_free: count.remaining(free_limit),
        should_charge: count.exhausted(free_limit),
        date: count.date,
        free_limit,
    }))
}

/// Count a chat message, charging it when the free quota is used up.
pub async fn record_message(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ChatCharge>, ApiError> {
    Ok(Json(state.ledger.record_chat_message(&auth.user_id)?))
}
