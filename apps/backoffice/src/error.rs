//! # API Error Type
//!
//! Unified error type for backoffice commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Mostrador                              │
//! │                                                                         │
//! │  UI                          Rust Backoffice                            │
//! │  ──                          ───────────────                            │
//! │                                                                         │
//! │  add_to_cart("v1")                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Backend Error? ─── ClientError::Status { 502 } ───┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Cart violation? ─── CoreError::StockExceeded ── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "STOCK_EXCEEDED", "message": "Only 1 of Polera (M) in stock" }│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mostrador_client::ClientError;
use mostrador_core::{CoreError, ValidationError};
use serde::Serialize;
use ts_rs::TS;

/// API error returned from backoffice commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Variation not found: v-123"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A price could not be parsed or formatted
    FormatError,

    /// Rejected input such as a zero cost price or inverted markup bounds
    InvalidInput,

    /// Cart mutation without an active store
    NoStoreSelected,

    /// Store holds none of the unit
    OutOfStock,

    /// Cart quantity would pass the store's stock
    StockExceeded,

    /// Submitting an empty cart
    EmptyCart,

    /// Backend unreachable or answered with an error
    BackendError,

    /// Backend answered with data we refuse to use
    InvalidPayload,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::Format { .. } => ErrorCode::FormatError,
            CoreError::InvalidInput { .. } => ErrorCode::InvalidInput,
            CoreError::NoStoreSelected => ErrorCode::NoStoreSelected,
            CoreError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CoreError::StockExceeded { .. } => ErrorCode::StockExceeded,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts backend errors to API errors.
///
/// Transport details are logged, not shown.
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Transport(e) => {
                tracing::error!("Backend request failed: {}", e);
                ApiError::new(ErrorCode::BackendError, "Backend is unreachable")
            }
            ClientError::Status { status, path, body } => {
                tracing::error!(status, %path, %body, "Backend returned an error");
                ApiError::new(
                    ErrorCode::BackendError,
                    format!("Backend returned {} for {}", status, path),
                )
            }
            ClientError::Decode { .. }
            | ClientError::InvalidPayload { .. }
            | ClientError::Validation(_) => {
                tracing::error!("Backend payload rejected: {}", err);
                ApiError::new(ErrorCode::InvalidPayload, err.to_string())
            }
            ClientError::Config(message) => ApiError::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
