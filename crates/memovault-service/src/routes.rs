//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, chats, credits, health, memories, themes};
use crate::state::AppState;

/// Maximum concurrent requests for user API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Maximum concurrent requests for admin endpoints.
const ADMIN_MAX_CONCURRENT_REQUESTS: usize = 10;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Credits (JWT auth)
/// - `GET /v1/credits/balance` - Balance and free chats left today
/// - `GET /v1/credits/transactions` - Transaction history, newest first
/// - `POST /v1/credits/purchase` - Buy credits
/// - `POST /v1/credits/redeem` - Redeem a code
///
/// ## Chats and memories (JWT auth)
/// - `GET /v1/chats/quota` - Today's free-chat quota
/// - `POST /v1/chats/messages` - Count (and possibly charge) a message
/// - `POST /v1/memories/charge` - Charge a memory save
///
/// ## Themes (JWT auth)
/// - `GET /v1/themes` - Catalog with owned/selected flags
/// - `POST /v1/themes/:idx/buy` - Buy a theme
/// - `POST /v1/themes/:idx/select` - Select an owned theme
///
/// ## Admin (Admin API key)
/// - `POST /v1/admin/credits/set` - Overwrite a balance
/// - `POST /v1/admin/credits/add` - Add credits
/// - `POST /v1/admin/credits/deduct` - Deduct credits
/// - `POST /v1/admin/chats/reset` - Reset the daily chat counter
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let admin_routes = Router::new()
        .route("/credits/set", post(admin::set_balance))
        .route("/credits/add", post(admin::add_credits))
        .route("/credits/deduct", post(admin::deduct_credits))
        .route("/chats/reset", post(admin::reset_daily_chats))
        .layer(ConcurrencyLimitLayer::new(ADMIN_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Credits
        .route("/credits/balance", get(credits::get_balance))
        .route("/credits/transactions", get(credits::list_transactions))
        .route("/credits/purchase", post(credits::purchase_credits))
        .route("/credits/redeem", post(credits::redeem_code))
        // Chats
        .route("/chats/quota", get(chats::get_quota))
        .route("/chats/messages", post(chats::record_message))
        // Memories
        .route("/memories/charge", post(memories::charge_memory_save))
        // Themes
        .route("/themes", get(themes::list_themes))
        .route("/themes/:idx/buy", post(themes::buy_theme))
        .route("/themes/:idx/select", post(themes::select_theme))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS))
        // Admin routes (with their own concurrency limit)
        .nest("/admin", admin_routes);

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
