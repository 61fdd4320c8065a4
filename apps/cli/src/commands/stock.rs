//! # Stock Commands
//!
//! Sales, restocking and the reports that drive them.
//!
//! ## Sale Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Flow                                       │
//! │                                                                         │
//! │  sell("1984", 10, "Bob")                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first "1984" with quantity >= 10?                                     │
//! │       │ yes                              │ no                           │
//! │       ▼                                  ▼                              │
//! │  quantity -= 10                    BookNotFound / InsufficientStock    │
//! │  Bob.purchases["1984"] += 10       (nothing changes)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Sold 10 x '1984' to Bob."                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::io::Write;
use tracing::debug;

use folio_core::CoreError;

use super::{write_books, write_json, OutputFormat};
use crate::error::CliResult;
use crate::state::Session;

#[derive(Debug, Serialize)]
struct SaleDto<'a> {
    title: &'a str,
    quantity: u32,
    customer: &'a str,
}

/// Sells `quantity` copies of `title` to `customer`.
pub fn sell<W: Write>(
    session: &mut Session,
    title: &str,
    quantity: u32,
    customer: &str,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    debug!(title = %title, quantity, customer = %customer, "sell");
    session.update(|catalog| catalog.sell(title, quantity, customer))?;

    match format {
        OutputFormat::Json => write_json(
            out,
            &SaleDto {
                title,
                quantity,
                customer,
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "Sold {quantity} x '{title}' to {customer}.")?;
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct RestockDto<'a> {
    title: &'a str,
    added: u32,
    quantity: u32,
}

/// Adds `quantity` copies to the first book titled `title`.
pub fn restock<W: Write>(
    session: &mut Session,
    title: &str,
    quantity: u32,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    debug!(title = %title, quantity, "restock");
    session.update(|catalog| catalog.restock(title, quantity))?;

    // restock always hits the first match, which is what `book` returns
    let on_hand = session.catalog().book(title).map_or(0, |b| b.quantity);

    match format {
        OutputFormat::Json => write_json(
            out,
            &RestockDto {
                title,
                added: quantity,
                quantity: on_hand,
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "Restocked '{title}' by {quantity} (now {on_hand}).")?;
            Ok(())
        }
    }
}

/// Shows books with fewer than `threshold` copies.
pub fn low_stock<W: Write>(
    session: &Session,
    threshold: u32,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    let books = session.catalog().low_stock_report(threshold);
    debug!(threshold, count = books.len(), "low_stock");

    if format == OutputFormat::Text && !books.is_empty() {
        writeln!(out, "Books with fewer than {threshold} copies:")?;
    }
    write_books(
        out,
        format,
        &books,
        &format!("No books have fewer than {threshold} copies."),
    )
}

#[derive(Debug, Serialize)]
struct PurchaseDto<'a> {
    title: &'a str,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct HistoryDto<'a> {
    customer: &'a str,
    total_units: u64,
    purchases: Vec<PurchaseDto<'a>>,
}

/// Shows what `customer` has bought this session.
///
/// An unknown customer is a `CustomerNotFound` error. Customers exist only
/// for the lifetime of the session.
pub fn purchases<W: Write>(
    session: &Session,
    customer: &str,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    let history: Vec<(&str, u32)> = session
        .catalog()
        .customer_purchases(customer)
        .ok_or_else(|| CoreError::CustomerNotFound(customer.to_string()))?
        .collect();
    let total = session
        .catalog()
        .customer(customer)
        .map_or(0, |account| account.total_units());

    match format {
        OutputFormat::Json => {
            let purchases: Vec<PurchaseDto> = history
                .iter()
                .map(|&(title, quantity)| PurchaseDto { title, quantity })
                .collect();
            write_json(
                out,
                &HistoryDto {
                    customer,
                    total_units: total,
                    purchases,
                },
            )
        }
        OutputFormat::Text => {
            if history.is_empty() {
                writeln!(out, "{customer} has not bought anything yet.")?;
                return Ok(());
            }
            writeln!(out, "Purchases for {customer}:")?;
            for (title, quantity) in history {
                writeln!(out, "  {title}: {quantity}")?;
            }
            writeln!(out, "  total: {total} copies")?;
            Ok(())
        }
    }
}
