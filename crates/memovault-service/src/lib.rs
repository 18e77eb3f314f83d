//! MemoVault HTTP API Service.
//!
//! This crate exposes the credits ledger over HTTP:
//!
//! - Credit balance, transaction history, purchases and redeem codes
//! - The daily free-chat quota and per-message charges
//! - Memory-save charges
//! - Themes bought with credits
//! - Admin balance adjustments
//!
//! # Authentication
//!
//! 1. **JWT bearer tokens** - for end-user requests, validated against the identity
//!    provider's JWKS. The `sub` claim is the user ID.
//! 2. **Admin API key** - the `X-Admin-Key` header, for `/v1/admin` routes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers call the synchronous ledger

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ServiceConfig, StorageBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, SharedStore};
