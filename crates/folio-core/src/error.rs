//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog operation failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  folio-store errors (separate crate)                                   │
//! │  └── StoreError       - Catalog file failures                          │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr + exit code     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (title, customer name, etc.)
//! 3. Errors are enum variants, never String
//! 4. A failed operation never leaves a partial mutation behind

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog operation errors.
///
/// Every variant is returned *before* any mutation happens, so a caller
/// that receives one can assume the catalog is exactly as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// No book in the catalog has this exact title.
    ///
    /// ## When This Occurs
    /// - `sell` or `restock` with a title typo
    /// - Titles are case-sensitive: "dune" does not match "Dune"
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// Books with this title exist, but none holds enough copies.
    ///
    /// ## User Workflow
    /// ```text
    /// sell("1984", 50, "Bob")
    ///      │
    ///      ▼
    /// Check stock: available=40
    ///      │
    ///      ▼
    /// InsufficientStock { title: "1984", available: 40, requested: 50 }
    ///      │
    ///      ▼
    /// CLI shows: "Insufficient stock for 1984: available 40, requested 50"
    /// ```
    #[error("Insufficient stock for {title}: available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: u32,
        requested: u32,
    },

    /// No customer account with this exact name.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Restocking would push the quantity past what a `u32` holds.
    #[error("Restocking {title} by {added} would overflow the current quantity {current}")]
    QuantityOverflow {
        title: String,
        current: u32,
        added: u32,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any catalog state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
