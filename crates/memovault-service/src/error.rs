//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use memovault_core::LedgerError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - the action does not apply to the current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Insufficient credits.
    #[error("insufficient credits: balance={balance}, required={required}")]
    InsufficientCredits {
        /// Current balance.
        balance: i64,
        /// Required amount.
        required: i64,
    },

    /// Redeem code unknown or already used by this user.
    #[error("invalid or already used code")]
    InvalidCode,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::InsufficientCredits { balance, required } => (
                StatusCode::PAYMENT_REQUIRED,
                "insufficient_credits",
                self.to_string(),
                Some(serde_json::json!({
                    "balance": balance,
                    "required": required
                })),
            ),
            Self::InvalidCode => (
                StatusCode::BAD_REQUEST,
                "invalid_code",
                "Invalid or already used code".to_string(),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientCredits { balance, required } => {
                Self::InsufficientCredits { balance, required }
            }
            LedgerError::InvalidAmount(msg) => Self::BadRequest(msg),
            LedgerError::InvalidId(e) => Self::BadRequest(format!("invalid user ID: {e}")),
            LedgerError::UnknownTheme { index } => Self::NotFound(format!("theme {index} not found")),
            LedgerError::ThemeAlreadyOwned { index } => {
                Self::Conflict(format!("theme {index} is already owned"))
            }
            LedgerError::ThemeNotOwned { index } => {
                Self::Conflict(format!("theme {index} is not owned"))
            }
            LedgerError::Storage(msg) => Self::Internal(msg),
        }
    }
}
