//! Admin handlers for direct balance and quota adjustments.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use memovault_core::UserId;

use crate::auth::AdminAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Set balance request.
#[derive(Debug, Deserialize)]
pub struct SetBalanceRequest {
    /// Target user.
    pub user_id: String,
    /// New balance.
    pub balance: i64,
}

/// Credit adjustment request.
#[derive(Debug, Deserialize)]
pub struct AdjustCreditsRequest {
    /// Target user.
    pub user_id: String,
    /// Credits to add or deduct.
    pub amount: i64,
}

/// Request naming a single user.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    /// Target user.
    pub user_id: String,
}

/// Admin balance response.
#[derive(Debug, Serialize)]
pub struct AdminBalanceResponse {
    /// Target user.
    pub user_id: UserId,
    /// Balance afterwards.
    pub balance: i64,
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid user ID: {e}")))
}

/// Overwrite a user's balance.
pub async fn set_balance(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Json(body): Json<SetBalanceRequest>,
) -> Result<Json<AdminBalanceResponse>, ApiError> {
    let user_id = parse_user_id(&body.user_id)?;
    state.ledger.set_balance(&user_id, body.balance)?;

    tracing::info!(admin_id = %admin.admin_id, user_id = %user_id, balance = body.balance, "Admin set balance");

    Ok(Json(AdminBalanceResponse {
        user_id,
        balance: body.balance,
    }))
}

/// Add credits to a user.
pub async fn add_credits(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Json(body): Json<AdjustCreditsRequest>,
) -> Result<Json<AdminBalanceResponse>, ApiError> {
    let user_id = parse_user_id(&body.user_id)?;
    let balance = state.ledger.add_credits(&user_id, body.amount)?;

    tracing::info!(admin_id = %admin.admin_id, user_id = %user_id, amount = body.amount, "Admin added credits");

    Ok(Json(AdminBalanceResponse { user_id, balance }))
}

/// Deduct credits from a user, clamping at zero.
pub async fn deduct_credits(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Json(body): Json<AdjustCreditsRequest>,
) -> Result<Json<AdminBalanceResponse>, ApiError> {
    let user_id = parse_user_id(&body.user_id)?;
    let balance = state.ledger.deduct_credits(&user_id, body.amount)?;

    tracing::info!(admin_id = %admin.admin_id, user_id = %user_id, amount = body.amount, "Admin deducted credits");

    Ok(Json(AdminBalanceResponse { user_id, balance }))
}

/// Clear a user's daily chat counter.
pub async fn reset_daily_chats(
    State(state): State<Arc<AppState>>,
    admin: AdminAuth,
    Json(body): Json<UserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user_id = parse_user_id(&body.user_id)?;
    state.ledger.reset_daily_count(&user_id)?;

    tracing::info!(admin_id = %admin.admin_id, user_id = %user_id, "Admin reset daily chats");

    Ok(Json(serde_json::json!({
        "user_id": user_id,
        "reset": true
    })))
}
