//! # Store Error Types
//!
//! Error types for catalog file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / RecordError                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path or line number          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (in app) ← Error code + message for the terminal             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::format::RecordError;

/// Catalog file errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The catalog file does not exist.
    ///
    /// ## When This Occurs
    /// - First run before `folio init`
    /// - Only when the store is configured with `MissingFile::Error`;
    ///   the default policy loads an empty catalog instead
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing the file failed.
    ///
    /// ## When This Occurs
    /// - Permission denied
    /// - Disk full during save
    /// - Parent directory cannot be created
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be decoded and the store is in strict mode.
    #[error("Malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: RecordError },
}

impl StoreError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
