//! MemoVault Client SDK.
//!
//! A typed client for the user-facing routes of the MemoVault credits service.
//!
//! # Example
//!
//! ```no_run
//! use memovault_client::{ClientError, MemoVaultClient};
//!
//! # async fn example() -> Result<(), ClientError> {
//! let client = MemoVaultClient::new("https://api.memovault.app", "user-jwt")?;
//!
//! match client.redeem_code("A#7f$Lp@9X").await {
//!     Ok(redeemed) => println!("+{} credits, balance {}", redeemed.amount, redeemed.balance),
//!     Err(ClientError::InvalidCode) => println!("code is invalid or already used"),
//!     Err(e) => return Err(e),
//! }
//!
//! let charge = client.record_chat_message().await?;
//! println!("{} free messages left today", charge.remaining_free);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, MemoVaultClient};
pub use error::ClientError;
pub use types::*;
