//! # CLI Error Type
//!
//! Unified error type for `folio` commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Folio                                  │
//! │                                                                         │
//! │  Command Function → CliResult<()>                                      │
//! │         │                                                               │
//! │         ├── StoreError::NotFound(path)      ──┐                        │
//! │         ├── CoreError::InsufficientStock    ──┼──► CliError            │
//! │         ├── ValidationError::Required       ──┤    { code, message }   │
//! │         └── ConfigError::Parse              ──┘         │              │
//! │                                                          ▼              │
//! │  one-shot command:  stderr "error: ..."  + exit code per ErrorCode     │
//! │  shell session:     "error: ..." printed, session keeps going          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;

use folio_core::{CoreError, ValidationError};
use folio_store::StoreError;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ## Serialization
/// With `--json` the binary prints failures as:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for 1984: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes, each with its own process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book, customer or catalog file not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Not enough copies for a sale
    InsufficientStock,

    /// Catalog file could not be read or written
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else (terminal write failures, etc.)
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::NotFound => 3,
            ErrorCode::ValidationError => 4,
            ErrorCode::InsufficientStock => 5,
            ErrorCode::StorageError => 6,
            ErrorCode::ConfigError => 7,
            ErrorCode::Internal => 1,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::BookNotFound(_) | CoreError::CustomerNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::QuantityOverflow { .. } => ErrorCode::ValidationError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Converts store errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => CliError::new(
                ErrorCode::NotFound,
                format!("{err}. Run `folio init` to create it."),
            ),
            StoreError::Io { .. } => {
                tracing::error!("Catalog I/O failed: {}", err);
                CliError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::Malformed { .. } => CliError::new(ErrorCode::StorageError, err.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal writes go through `std::io::Write`.
impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(format!("output failed: {err}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON encoding failed: {err}"))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for commands.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_core_error_codes() {
        let err: CliError = CoreError::BookNotFound("Dune".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Book not found: Dune");

        let err: CliError = CoreError::InsufficientStock {
            title: "1984".into(),
            available: 1,
            requested: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.code.exit_code(), 5);
    }

    #[test]
    fn test_store_not_found_suggests_init() {
        let err: CliError = StoreError::NotFound(PathBuf::from("/x/catalog.txt")).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("folio init"));
    }

    #[test]
    fn test_json_shape() {
        let err = CliError::validation("quantity must not be negative");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "quantity must not be negative");
    }
}
