//! The MemoVault credits ledger.
//!
//! [`Ledger`] owns every operation on a user's credits state: balance changes,
//! redeem codes, the transaction log, the daily free-chat counter, themes, and the
//! premium charges built on top of them. State lives in an injected
//! [`memovault_store::KvStore`].
//!
//! # Concurrency
//!
//! Each read-modify-write sequence runs under a per-user lock, so two concurrent
//! redemptions of the same code by the same user credit it once. Different users
//! never contend.
//!
//! # Example
//!
//! ```
//! use memovault_core::UserId;
//! use memovault_ledger::Ledger;
//! use memovault_store::MemoryStore;
//!
//! # fn main() -> memovault_core::Result<()> {
//! let ledger = Ledger::new(MemoryStore::new());
//! let user_id = UserId::new("user-1")?;
//!
//! ledger.add_credits(&user_id, 100)?;
//! let redeemed = ledger.redeem_code(&user_id, "A#7f$Lp@9X")?;
//! assert_eq!(redeemed.map(|r| r.amount), Some(100));
//! assert_eq!(ledger.redeem_code(&user_id, "A#7f$Lp@9X")?, None);
//! assert_eq!(ledger.balance(&user_id)?, 200);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod charges;
pub mod clock;
mod ledger;
mod locks;
mod quota;
#[cfg(test)]
mod testing;
mod themes;

pub use charges::{ChatCharge, MemoryCharge};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::{Ledger, Redemption};
pub use themes::ThemeStatus;
