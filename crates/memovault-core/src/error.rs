//! Error types for the MemoVault ledger.

use crate::ids::IdError;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in ledger operations.
///
/// Malformed stored values are not errors: they read as their defaults.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Insufficient credits for a spending operation.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Invalid amount.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Theme index outside the catalog.
    #[error("unknown theme: {index}")]
    UnknownTheme {
        /// The requested theme index.
        index: usize,
    },

    /// Theme already owned by the user.
    #[error("theme already owned: {index}")]
    ThemeAlreadyOwned {
        /// The requested theme index.
        index: usize,
    },

    /// Theme not owned by the user.
    #[error("theme not owned: {index}")]
    ThemeNotOwned {
        /// The requested theme index.
        index: usize,
    },

    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
