//! Core types and rules for the MemoVault credits ledger.
//!
//! This crate provides the foundational types shared by the store, ledger and service crates:
//!
//! - **Identifiers**: `UserId`
//! - **Credits**: `Transaction`, `TransactionKind`, the static redeem-code table
//! - **Quota**: `DailyCount`, the free daily chat limit and calendar-day labels
//! - **Themes**: the theme catalog priced in credits
//! - **Pricing**: `PricingConfig`
//!
//! # Credits
//!
//! Credits are plain integers. They are granted by redeem codes and purchases and
//! spent on themes and premium actions (chat messages beyond the free daily quota,
//! saving memories past the free allowance).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credits;
pub mod error;
pub mod ids;
pub mod pricing;
pub mod quota;
pub mod themes;

pub use credits::{
    redeem_amount, Transaction, TransactionKind, MAX_PURCHASE_CREDITS, MIN_PURCHASE_CREDITS,
    REDEEM_CODES,
};
pub use error::{LedgerError, Result};
pub use ids::{IdError, UserId};
pub use pricing::{
    PricingConfig, DEFAULT_CHAT_MESSAGE_COST, MEMORY_SAVE_COST, MEMORY_SAVE_FREE_THRESHOLD,
    THEME_PRICE,
};
pub use quota::{day_label, DailyCount, FREE_DAILY_CHAT_LIMIT};
pub use themes::{find_theme, Theme, DEFAULT_THEME_INDEX, THEMES};
