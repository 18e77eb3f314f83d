//! Theme handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use memovault_ledger::ThemeStatus;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Theme catalog response.
#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    /// Every theme, annotated for the caller.
    pub themes: Vec<ThemeStatus>,
    /// Active theme index.
    pub selected: usize,
}

/// List the theme catalog.
pub async fn list_themes(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<Json<ThemesResponse>, ApiError> {
    Ok(Json(ThemesResponse {
        themes: state.ledger.theme_catalog(&auth.user_id)?,
        selected: state.ledger.selected_theme(&auth.user_id)?,
    }))
}

/// Theme purchase response.
#[derive(Debug, Serialize)]
pub struct BuyThemeResponse {
    /// The bought theme.
    pub index: usize,
    /// Balance afterwards.
    pub balance: i64,
}

/// Buy a theme with credits.
pub async fn buy_theme(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(index): Path<usize>,
) -> Result<Json<BuyThemeResponse>, ApiError> {
    let balance = state.ledger.buy_theme(&auth.user_id, index)?;
    Ok(Json(BuyThemeResponse { index, balance }))
}

/// Theme selection response.
#[derive(Debug, Serialize)]
pub struct SelectThemeResponse {
    /// Active theme index.
    pub selected: usize,
}

/// Make an owned theme active.
pub async fn select_theme(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(index): Path<usize>,
) -> Result<Json<SelectThemeResponse>, ApiError> {
    state.ledger.select_theme(&auth.user_id, index)?;
    Ok(Json(SelectThemeResponse { selected: index }))
}
