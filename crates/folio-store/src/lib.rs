//! # folio-store: Catalog Persistence for Folio
//!
//! This crate reads and writes the flat catalog file. It is the only part
//! of Folio that touches the file system for catalog data.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Data Flow                                │
//! │                                                                         │
//! │  folio CLI command (sell)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   folio-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │    format     │    │      fs      │  │   │
//! │  │   │  (store.rs)   │───►│ encode/decode │    │ temp + rename│  │   │
//! │  │   │ load / save   │───►│ read_records  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Catalog File                              │   │
//! │  │   ~/.local/share/folio/catalog.txt                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `CatalogStore`, configuration and load reports
//! - [`format`] - The one-line-per-book record codec
//! - [`fs`] - Atomic file replacement
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_store::{CatalogStore, StoreConfig};
//!
//! let store = CatalogStore::new(StoreConfig::new("catalog.txt"));
//! let (mut catalog, report) = store.load()?;
//! if let Some(bad) = &report.malformed {
//!     eprintln!("stopped at line {}: {}", bad.line, bad.reason);
//! }
//!
//! catalog.restock("1984", 5).ok();
//! store.save(&catalog)?;
//! # Ok::<(), folio_store::StoreError>(())
//! ```

pub mod error;
pub mod format;
pub mod fs;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use format::{MalformedRecord, RecordError};
pub use store::{CatalogStore, LoadReport, LoadSource, MissingFile, StoreConfig};
