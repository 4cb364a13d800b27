//! # Error Types
//!
//! Domain-specific error types for mostrador-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mostrador-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing, formatting and cart failures          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  mostrador-client errors (separate crate)                              │
//! │  └── ClientError      - Backend transport and payload failures         │
//! │                                                                         │
//! │  backoffice errors (in app)                                            │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → ApiError → UI       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Propagation
//! Pure components (formatter, aggregator, flattener, markup engine) return
//! these errors straight to their caller. The sale cart never fails loudly:
//! a rejected add leaves the cart untouched, fires a notification and hands
//! the same error back as a value.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core computation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Price input could not be parsed into a number.
    ///
    /// ## When This Occurs
    /// - Input is empty after stripping non-numeric characters
    /// - More than one decimal point survives stripping (`"1.234.567"`)
    /// - Numeric input is NaN or infinite
    #[error("Cannot format price from {input:?}: {reason}")]
    Format { input: String, reason: String },

    /// Non-positive cost/list price, or an invalid markup configuration.
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A cart mutation was attempted without an active store.
    #[error("No store selected")]
    NoStoreSelected,

    /// The unit has no stock at the selected store.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// One more unit would exceed the available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add "Zapatilla 42" (available: 1)
    ///      │
    ///      ▼
    /// Cart already holds 1
    ///      │
    ///      ▼
    /// StockExceeded { available: 1 }
    ///      │
    ///      ▼
    /// UI shows: "Only 1 Zapatilla 42 in stock"
    /// ```
    #[error("Only {available} of {name} in stock")]
    StockExceeded { name: String, available: u64 },

    /// Submitting a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a Format error.
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidInput error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used at the backend boundary before records become domain types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Category tree shape violation.
    #[error("Category {id} is invalid: {reason}")]
    CategoryTree { id: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
