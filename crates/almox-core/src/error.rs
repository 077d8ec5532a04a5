//! # Error Types
//!
//! Domain-specific error types for almox-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  almox-core errors (this file)                                         │
//! │  ├── CoreError        - Rejected inventory / account operations        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  almox-db errors (separate crate)                                      │
//! │  └── DbError          - Storage failures, wraps CoreError              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected operation leaves the in-memory state untouched; the error
//! is the "failure" half of the success/failure signal callers branch on.

use thiserror::Error;

use crate::types::ProductStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors returned by [`crate::Inventory`] and [`crate::Roster`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Withdrawal larger than the current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Withdraw 10 units of "Monitor LG 24""
    ///      │
    ///      ▼
    /// Check stock: quantity=2
    ///      │
    ///      ▼
    /// InsufficientStock { available: 2, requested: 10 }
    ///      │
    ///      ▼
    /// UI shows: "Only 2 units in stock"
    /// ```
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Unit count for a stock operation was zero or negative.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    /// Adding units would push the stock past the largest representable count.
    #[error("Stock overflow for {product_id}: {stock} + {adding} exceeds the maximum")]
    StockOverflow {
        product_id: String,
        stock: i64,
        adding: i64,
    },

    /// `return_from_maintenance` on a product that is not in maintenance.
    #[error("Product {product_id} is {status}, not in maintenance")]
    NotInMaintenance {
        product_id: String,
        status: ProductStatus,
    },

    /// An account with this email already exists (case-sensitive match).
    #[error("An account with email '{0}' already exists")]
    DuplicateEmail(String),

    /// No account matches the email/password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. an email without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
