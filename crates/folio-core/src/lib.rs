//! # folio-core: Pure Business Logic for Folio
//!
//! This crate is the **heart** of Folio. It holds the bookstore's
//! inventory and sales ledger with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (folio binary)                      │   │
//! │  │    list ──► search ──► sell ──► restock ──► low-stock          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   types   │  │   money   │  │ validation│  │   │
//! │  │   │  Catalog  │  │   Book    │  │   Money   │  │   rules   │  │   │
//! │  │   │           │  │ Customer  │  │           │  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 folio-store (Persistence Layer)                 │   │
//! │  │             catalog file codec, atomic save, load report        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The `Catalog` aggregate and every operation on it
//! - [`types`] - `Book` and `Customer` records
//! - [`money`] - Integer-cents price type
//! - [`error`] - Domain error types
//! - [`validation`] - Field presence and numeric input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{Book, Catalog, Money};
//!
//! let mut catalog = Catalog::new();
//! catalog
//!     .add(Book::new("1984", "George Orwell", "Fiction", 40, Money::from_cents(999)))
//!     .unwrap();
//!
//! catalog.sell("1984", 10, "Bob").unwrap();
//! assert_eq!(catalog.book("1984").unwrap().quantity, 30);
//! assert_eq!(catalog.require_customer("Bob").unwrap().purchased("1984"), 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Book, Customer};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Low-stock threshold used when nothing else is configured.
///
/// Books with fewer copies than this on hand show up in the report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// The three titles a fresh catalog is seeded with.
pub fn starter_books() -> Vec<Book> {
    vec![
        Book::new(
            "The Catcher in the Rye",
            "J.D. Salinger",
            "Fiction",
            50,
            Money::from_cents(1099),
        ),
        Book::new(
            "To Kill a Mockingbird",
            "Harper Lee",
            "Fiction",
            30,
            Money::from_cents(1299),
        ),
        Book::new("1984", "George Orwell", "Fiction", 40, Money::from_cents(999)),
    ]
}
