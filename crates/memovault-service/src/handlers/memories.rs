//! Memory-save charge handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use memovault_ledger::MemoryCharge;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Memory-save charge request.
#[derive(Debug, Deserialize)]
pub struct ChargeMemoryRequest {
    /// Memories the user holds before this save.
    pub existing_memories: u32,
}

/// Charge for a memory save past the free allowance.
pub async fn charge_memory_save(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(body): Json<ChargeMemoryRequest>,
) -> Result<Json<MemoryCharge>, ApiError> {
    Ok(Json(
        state
            .ledger
            .charge_memory_save(&auth.user_id, body.existing_memories)?,
    ))
}
