//! # Domain Types
//!
//! The two record types the catalog is made of.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐              ┌──────────────────────────┐         │
//! │  │      Book       │              │        Customer          │         │
//! │  │  ─────────────  │   sell()     │  ──────────────────────  │         │
//! │  │  title (key)    │ ───────────► │  name (key)              │         │
//! │  │  author         │  title, qty  │  purchases:              │         │
//! │  │  category       │              │    title → cumulative qty│         │
//! │  │  quantity (u32) │              └──────────────────────────┘         │
//! │  │  price (Money)  │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! - Books are keyed by `title`, but duplicate titles are not rejected.
//! - Customers are keyed by `name`, and the catalog never creates two
//!   customers with the same name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// Column widths of the fixed-width book row.
const TITLE_WIDTH: usize = 30;
const AUTHOR_WIDTH: usize = 22;
const CATEGORY_WIDTH: usize = 14;
const QUANTITY_WIDTH: usize = 8;
const PRICE_WIDTH: usize = 10;

/// An inventory line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Display title, also the lookup key for sell and restock.
    pub title: String,

    /// Author as entered.
    pub author: String,

    /// Free-form shelf category ("Fiction", "History", ...).
    pub category: String,

    /// Copies currently on hand.
    pub quantity: u32,

    /// Unit price.
    pub price: Money,
}

impl Book {
    /// Creates a new book record.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        price: Money,
    ) -> Self {
        Book {
            title: title.into(),
            author: author.into(),
            category: category.into(),
            quantity,
            price,
        }
    }

    /// Returns the value of the copies on hand (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Returns the column header matching the `Display` row layout.
    pub fn header() -> String {
        format!(
            "{:<tw$}{:<aw$}{:<cw$}{:>qw$}{:>pw$}",
            "Title",
            "Author",
            "Category",
            "Quantity",
            "Price",
            tw = TITLE_WIDTH,
            aw = AUTHOR_WIDTH,
            cw = CATEGORY_WIDTH,
            qw = QUANTITY_WIDTH,
            pw = PRICE_WIDTH,
        )
    }
}

/// Fixed-width row: title, author, category left aligned; quantity and
/// price right aligned.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<tw$}{:<aw$}{:<cw$}{:>qw$}{:>pw$}",
            self.title,
            self.author,
            self.category,
            self.quantity,
            self.price,
            tw = TITLE_WIDTH,
            aw = AUTHOR_WIDTH,
            cw = CATEGORY_WIDTH,
            qw = QUANTITY_WIDTH,
            pw = PRICE_WIDTH,
        )
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A named account accumulating purchase history.
///
/// ## Accumulation
/// ```text
/// sell("Dune", 2, "Alice")  →  Alice { Dune: 2 }
/// sell("Dune", 3, "Alice")  →  Alice { Dune: 5 }
/// sell("Emma", 1, "Alice")  →  Alice { Dune: 5, Emma: 1 }
/// ```
/// Entries are never reset or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Account name, the lookup key.
    pub name: String,

    /// Book title → cumulative copies purchased.
    purchases: BTreeMap<String, u32>,
}

impl Customer {
    /// Creates a customer with an empty purchase history.
    pub fn new(name: impl Into<String>) -> Self {
        Customer {
            name: name.into(),
            purchases: BTreeMap::new(),
        }
    }

    /// Adds `quantity` copies of `title` to the history.
    ///
    /// Creates the entry at zero if absent. Saturates at `u32::MAX`.
    pub fn add_purchase(&mut self, title: &str, quantity: u32) {
        let entry = self.purchases.entry(title.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    /// Iterates `(title, quantity)` pairs in title order.
    pub fn purchases(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.purchases.iter().map(|(title, qty)| (title.as_str(), *qty))
    }

    /// Returns the cumulative quantity bought for one title.
    pub fn purchased(&self, title: &str) -> u32 {
        self.purchases.get(title).copied().unwrap_or(0)
    }

    /// Total copies bought across all titles.
    pub fn total_units(&self) -> u64 {
        self.purchases.values().map(|&qty| u64::from(qty)).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
