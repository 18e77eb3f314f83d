//! Credit transaction types and the static redeem-code table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Smallest amount accepted by a credit purchase.
pub const MIN_PURCHASE_CREDITS: i64 = 10;

/// Largest amount accepted by a credit purchase.
pub const MAX_PURCHASE_CREDITS: i64 = 10_000;

/// Single-use redeem codes and the credits each one grants.
pub const REDEEM_CODES: &[(&str, i64)] = &[
    ("A#7f$Lp@9X", 100),
    ("z%2&Kq!T8v", 200),
    ("*M9@aL3#Xe", 500),
    ("P$k7^dR1!q", 1000),
    ("y@X8#Vm$4J", 10_000),
];

/// Look up the credit grant of a redeem code.
///
/// Matching is exact; callers trim user input before the lookup.
#[must_use]
pub fn redeem_amount(code: &str) -> Option<i64> {
    REDEEM_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, amount)| *amount)
}

/// A credit transaction in a user's log.
///
/// The serialized field names match the layout persisted under `credit_tx_<uid>`,
/// so records written before `Spend` and `item` existed still parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Type of transaction.
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Credits moved. Always positive; the kind gives the direction.
    pub amount: i64,

    /// When the transaction happened.
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,

    /// Redeem code, for `Redeem` transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// What the credits were spent on, for `Spend` transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
}

impl Transaction {
    /// Create a redeem transaction.
    #[must_use]
    pub fn redeem(amount: i64, code: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind: TransactionKind::Redeem,
            amount,
            created_at: at,
            code: Some(code.into()),
            item: None,
        }
    }

    /// Create a purchase transaction.
    #[must_use]
    pub fn purchase(amount: i64, at: DateTime<Utc>) -> Self {
        Self {
            kind: TransactionKind::Purchase,
            amount,
            created_at: at,
            code: None,
            item: None,
        }
    }

    /// Create a spend transaction. `amount` is the number of credits spent.
    #[must_use]
    pub fn spend(amount: i64, item: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            kind: TransactionKind::Spend,
            amount,
            created_at: at,
            code: None,
            item: Some(item.into()),
        }
    }

    /// Signed balance change of this transaction.
    #[must_use]
    pub const fn signed_amount(&self) -> i64 {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// Type of credit transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Credits granted by a redeem code.
    Redeem,

    /// Credits bought by the user.
    Purchase,

    /// Credits spent on a theme or a premium action.
    Spend,
}

impl TransactionKind {
    /// Check if this transaction type adds credits.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        matches!(self, Self::Redeem | Self::Purchase)
    }
}
