//! # Commands Module
//!
//! Everything the `folio` binary can do to a catalog.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (output helpers, dispatch)
//! ├── book.rs     ◄─── init, list, search, add, value
//! └── stock.rs    ◄─── sell, restock, low stock, customer purchases
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Command Flow                                       │
//! │                                                                         │
//! │  folio sell 1984 10 --customer Bob        shell option "3"             │
//! │         │                                        │                      │
//! │         ▼                                        ▼                      │
//! │  dispatch(session, Command::Sell { .. })   stock::sell(session, ..)    │
//! │         │                                        │                      │
//! │         └──────────────┬─────────────────────────┘                      │
//! │                        ▼                                                │
//! │  session.update(|catalog| catalog.sell(title, qty, customer))          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │  write text (or JSON with --json) to the output writer                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command writes to a generic `Write` so the shell and the tests can
//! capture output.

pub mod book;
pub mod stock;

use serde::Serialize;
use std::io::Write;

use folio_core::Book;

use crate::cli::Command;
use crate::error::{CliError, CliResult};
use crate::state::Session;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Book as printed with `--json`.
///
/// The price is carried both as the decimal string the catalog file uses
/// and as integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDto {
    pub title: String,
    pub author: String,
    pub category: String,
    pub quantity: u32,
    pub price: String,
    pub price_cents: i64,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        BookDto {
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            quantity: book.quantity,
            price: book.price.to_decimal_string(),
            price_cents: book.price.cents(),
        }
    }
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W, T>(out: &mut W, value: &T) -> CliResult<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes books as a table, or a JSON array.
///
/// `empty` is printed instead of the table when there is nothing to show.
pub fn write_books<W: Write>(
    out: &mut W,
    format: OutputFormat,
    books: &[&Book],
    empty: &str,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let dtos: Vec<BookDto> = books.iter().map(|b| BookDto::from(*b)).collect();
            write_json(out, &dtos)
        }
        OutputFormat::Text if books.is_empty() => {
            writeln!(out, "{empty}")?;
            Ok(())
        }
        OutputFormat::Text => {
            writeln!(out, "{}", Book::header())?;
            for book in books {
                writeln!(out, "{book}")?;
            }
            Ok(())
        }
    }
}

/// Runs a catalog command against a loaded session.
///
/// `init` and `shell` need more than a session and are handled by the
/// caller.
pub fn dispatch<W: Write>(
    session: &mut Session,
    command: &Command,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        Command::List => book::list(session, out, format),
        Command::Search { text } => book::search(session, text, out, format),
        Command::Add {
            title,
            author,
            category,
            quantity,
            price,
        } => book::add(
            session,
            Book::new(title.as_str(), author.as_str(), category.as_str(), *quantity, *price),
            out,
            format,
        ),
        Command::Value => book::value(session, out, format),
        Command::Sell {
            title,
            quantity,
            customer,
        } => stock::sell(session, title, *quantity, customer, out, format),
        Command::Restock { title, quantity } => stock::restock(session, title, *quantity, out, format),
        Command::LowStock { threshold } => {
            let threshold = threshold.unwrap_or_else(|| session.low_stock_threshold());
            stock::low_stock(session, threshold, out, format)
        }
        Command::Init { .. } | Command::Shell => Err(CliError::internal(
            "init and shell are not catalog commands",
        )),
    }
}
