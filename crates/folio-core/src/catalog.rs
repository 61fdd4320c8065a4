//! # Catalog
//!
//! The aggregate root: owns every Book and Customer and is the only way
//! to change them.
//!
//! ## Operation Surface
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Operations                              │
//! │                                                                         │
//! │  Mutating                          Read-only                           │
//! │  ────────                          ─────────                           │
//! │  add(book)          append         list()                 all books    │
//! │  sell(t, q, who)    stock -= q     search_by_title(s)     substring    │
//! │                     ledger += q    low_stock_report(n)    qty < n      │
//! │  restock(t, q)      stock += q     customer_purchases(who)             │
//! │  replace_books(v)   load hook      inventory_value()                   │
//! │                                                                         │
//! │  Every mutating call either applies fully or returns an error and      │
//! │  leaves the catalog untouched.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate Titles
//! Titles are not forced to be unique. Lookups scan in insertion order
//! and the first qualifying book wins:
//! ```text
//! books: [ Dune(qty 1), Dune(qty 9) ]
//!
//! sell("Dune", 5, ..)   → skips the first (1 < 5), sells from the second
//! restock("Dune", 5)    → always the first
//! ```

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Book, Customer};
use crate::validation::{validate_customer_name, validate_price, validate_title};

/// In-memory inventory and sales ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    books: Vec<Book>,
    customers: Vec<Customer>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding `books` in the given order.
    pub fn with_books(books: Vec<Book>) -> Self {
        Catalog {
            books,
            customers: Vec::new(),
        }
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// Appends a book.
    ///
    /// ## Rules
    /// - Title must not be blank
    /// - Price must not be negative
    /// - No duplicate check: an existing title is appended again
    pub fn add(&mut self, book: Book) -> CoreResult<()> {
        validate_title(&book.title)?;
        validate_price(book.price)?;
        self.books.push(book);
        Ok(())
    }

    /// All books in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Number of book records (duplicates counted separately).
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Returns true when the catalog holds no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// First book whose title equals `title` exactly.
    pub fn book(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }

    /// Books whose title contains `needle` (case-sensitive), in catalog order.
    ///
    /// No matches is an empty vector, not an error. An empty needle
    /// matches every book.
    pub fn search_by_title(&self, needle: &str) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.title.contains(needle))
            .collect()
    }

    /// Books with quantity strictly below `threshold`, in catalog order.
    pub fn low_stock_report(&self, threshold: u32) -> Vec<&Book> {
        self.books
            .iter()
            .filter(|b| b.quantity < threshold)
            .collect()
    }

    /// Sum of price × quantity over every book.
    pub fn inventory_value(&self) -> Money {
        self.books.iter().map(Book::stock_value).sum()
    }

    /// Replaces every book, keeping customers as they are.
    ///
    /// Used by the persistence layer after a load.
    pub fn replace_books(&mut self, books: Vec<Book>) {
        self.books = books;
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Sells `quantity` copies of `title` to `customer`.
    ///
    /// ## Flow
    /// ```text
    /// sell("1984", 10, "Bob")
    ///      │
    ///      ▼
    /// first book with title == "1984" AND quantity >= 10
    ///      │
    ///      ├── none, but "1984" exists → InsufficientStock
    ///      ├── no "1984" at all        → BookNotFound
    ///      │
    ///      ▼
    /// book.quantity -= 10
    /// customers["Bob"] (created if new) .add_purchase("1984", 10)
    /// ```
    ///
    /// Selling zero copies succeeds and still opens the customer account.
    pub fn sell(&mut self, title: &str, quantity: u32, customer: &str) -> CoreResult<()> {
        validate_customer_name(customer)?;

        let index = self
            .books
            .iter()
            .position(|b| b.title == title && b.quantity >= quantity);

        let Some(index) = index else {
            return Err(self.sell_failure(title, quantity));
        };

        self.books[index].quantity -= quantity;
        self.customer_entry(customer).add_purchase(title, quantity);
        Ok(())
    }

    /// Works out why no book qualified for a sale.
    fn sell_failure(&self, title: &str, requested: u32) -> CoreError {
        let available = self
            .books
            .iter()
            .filter(|b| b.title == title)
            .map(|b| b.quantity)
            .max();

        match available {
            Some(available) => CoreError::InsufficientStock {
                title: title.to_string(),
                available,
                requested,
            },
            None => CoreError::BookNotFound(title.to_string()),
        }
    }

    /// Adds `quantity` copies to the first book titled `title`.
    pub fn restock(&mut self, title: &str, quantity: u32) -> CoreResult<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.title == title)
            .ok_or_else(|| CoreError::BookNotFound(title.to_string()))?;

        let current = book.quantity;
        book.quantity = current
            .checked_add(quantity)
            .ok_or_else(|| CoreError::QuantityOverflow {
                title: title.to_string(),
                current,
                added: quantity,
            })?;
        Ok(())
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// All customers in the order they first bought something.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Customer with exactly this name, if any.
    pub fn customer(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.name == name)
    }

    /// Like [`Catalog::customer`], but a missing account is an error.
    pub fn require_customer(&self, name: &str) -> CoreResult<&Customer> {
        self.customer(name)
            .ok_or_else(|| CoreError::CustomerNotFound(name.to_string()))
    }

    /// Purchase listing for `name`.
    ///
    /// `None` means no such customer; `Some` of an empty iterator cannot
    /// happen today since accounts open on their first sale, but callers
    /// should not rely on that.
    pub fn customer_purchases(&self, name: &str) -> Option<impl Iterator<Item = (&str, u32)> + '_> {
        self.customer(name).map(|c| c.purchases())
    }

    fn customer_entry(&mut self, name: &str) -> &mut Customer {
        let index = match self.customers.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.customers.push(Customer::new(name));
                self.customers.len() - 1
            }
        };
        &mut self.customers[index]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
