//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Liveness report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process answers.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Storage backend the ledger runs on.
    pub storage: String,
    /// Free chat messages per day.
    pub free_daily_chats: u32,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "memovault",
        version: env!("CARGO_PKG_VERSION"),
        storage: state.config.storage_backend.to_string(),
        free_daily_chats: state.ledger.pricing().free_daily_chats,
    })
}
