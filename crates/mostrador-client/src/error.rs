//! # Client Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reqwest::Error            ──► ClientError::Transport                   │
//! │  HTTP 4xx / 5xx            ──► ClientError::Status { status, body }     │
//! │  body is not the schema    ──► ClientError::Decode                      │
//! │  bad number / neg. stock   ──► ClientError::InvalidPayload { record }   │
//! │  dup SKU / bad tree        ──► ClientError::Validation                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (backoffice) ← code + message for the UI                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mostrador_core::ValidationError;
use thiserror::Error;

/// Backend-access errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - Backend unreachable, DNS failure, TLS failure
    /// - Request timed out
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    /// The body did not match the expected schema.
    #[error("Cannot decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but carries an impossible value.
    ///
    /// ## When This Occurs
    /// - Negative or fractional stock
    /// - Price that is not a number
    #[error("Invalid {record}: {reason}")]
    InvalidPayload { record: String, reason: String },

    /// Catalog-wide rule broken (duplicate SKU, malformed category tree).
    #[error("Catalog rejected: {0}")]
    Validation(#[from] ValidationError),

    /// Backend configuration is unusable.
    #[error("Invalid backend configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Creates an InvalidPayload error naming the offending record.
    pub fn invalid(record: impl Into<String>, reason: impl Into<String>) -> Self {
        ClientError::InvalidPayload {
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Decode error.
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        ClientError::Decode {
            what: what.into(),
            source,
        }
    }

    /// True for failures worth retrying by hand (network, 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type for backend operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_transient_only_for_5xx() {
        let server = ClientError::Status {
            status: 503,
            path: "/products".to_string(),
            body: String::new(),
        };
        let missing = ClientError::Status {
            status: 404,
            path: "/products".to_string(),
            body: String::new(),
        };
        assert!(server.is_transient());
        assert!(!missing.is_transient());
        assert!(!ClientError::invalid("variation v1", "negative stock").is_transient());
    }

    #[test]
    fn test_invalid_payload_names_record() {
        let err = ClientError::invalid("variation v1", "stock must not be negative");
        assert_eq!(err.to_string(), "Invalid variation v1: stock must not be negative");
    }

    #[test]
    fn test_tree_errors_convert_to_validation() {
        let err: ClientError = ValidationError::CategoryTree {
            id: "11".to_string(),
            reason: "nesting deeper than one level".to_string(),
        }
        .into();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(!err.is_transient());
        assert_eq!(
            err.to_string(),
            "Catalog rejected: Category 11 is invalid: nesting deeper than one level"
        );
    }
}
