//! # Book Commands
//!
//! Creating the catalog and browsing it.

use serde::Serialize;
use std::io::Write;
use tracing::{debug, info};

use folio_core::{starter_books, Book, Catalog};
use folio_store::CatalogStore;

use super::{write_books, write_json, BookDto, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::state::Session;

/// Writes the starter catalog.
///
/// ## Rules
/// - An existing file is only replaced with `force`
/// - The three starter books are written in a fixed order
pub fn init<W: Write>(
    store: &CatalogStore,
    force: bool,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    if store.exists() && !force {
        return Err(CliError::validation(format!(
            "Catalog already exists at {}; pass --force to overwrite it",
            store.path().display()
        )));
    }

    let written = store.save(&Catalog::with_books(starter_books()))?;
    info!(path = %store.path().display(), records = written, "Starter catalog written");

    #[derive(Serialize)]
    struct InitDto {
        path: String,
        records: usize,
    }

    match format {
        OutputFormat::Json => write_json(
            out,
            &InitDto {
                path: store.path().display().to_string(),
                records: written,
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "Wrote {written} books to {}", store.path().display())?;
            Ok(())
        }
    }
}

/// Shows every book in catalog order.
pub fn list<W: Write>(session: &Session, out: &mut W, format: OutputFormat) -> CliResult<()> {
    let books: Vec<&Book> = session.catalog().list().iter().collect();
    write_books(out, format, &books, "The catalog is empty.")
}

/// Shows books whose title contains `text`.
///
/// Case-sensitive. No match is not an error.
pub fn search<W: Write>(
    session: &Session,
    text: &str,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    let matches = session.catalog().search_by_title(text);
    debug!(query = %text, count = matches.len(), "search");
    write_books(out, format, &matches, &format!("No books match '{text}'."))
}

/// Appends a book. Duplicate titles are accepted.
pub fn add<W: Write>(
    session: &mut Session,
    book: Book,
    out: &mut W,
    format: OutputFormat,
) -> CliResult<()> {
    let dto = BookDto::from(&book);
    if session.catalog().book(&book.title).is_some() {
        debug!(title = %book.title, "Adding a second book with an existing title");
    }

    session.update(|catalog| catalog.add(book))?;
    debug!(title = %dto.title, quantity = dto.quantity, "add");

    match format {
        OutputFormat::Json => write_json(out, &dto),
        OutputFormat::Text => {
            writeln!(out, "Added '{}'.", dto.title)?;
            Ok(())
        }
    }
}

/// Total value of the stock on hand.
#[derive(Debug, Serialize)]
struct ValueDto {
    books: usize,
    copies: u64,
    value: String,
    value_cents: i64,
}

/// Shows the total value of the stock on hand.
pub fn value<W: Write>(session: &Session, out: &mut W, format: OutputFormat) -> CliResult<()> {
    let catalog = session.catalog();
    let total = catalog.inventory_value();
    let dto = ValueDto {
        books: catalog.len(),
        copies: catalog.list().iter().map(|b| u64::from(b.quantity)).sum(),
        value: total.to_decimal_string(),
        value_cents: total.cents(),
    };

    match format {
        OutputFormat::Json => write_json(out, &dto),
        OutputFormat::Text => {
            writeln!(
                out,
                "Inventory value: {total} ({} books, {} copies)",
                dto.books, dto.copies
            )?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Money;
    use tempfile::tempdir;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> CliResult<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn starter_session(dir: &tempfile::TempDir) -> Session {
        let store = CatalogStore::at(dir.path().join("catalog.txt"));
        Session::with_catalog(store, Catalog::with_books(starter_books()), 5)
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));

        let text = output(|out| init(&store, false, out, OutputFormat::Text));
        assert!(text.starts_with("Wrote 3 books"));

        let mut out = Vec::new();
        let err = init(&store, false, &mut out, OutputFormat::Text).unwrap_err();
        assert!(err.message.contains("--force"));

        assert!(init(&store, true, &mut out, OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_search_without_match() {
        let dir = tempdir().unwrap();
        let session = starter_session(&dir);

        let text = output(|out| search(&session, "mockingbird", out, OutputFormat::Text));
        assert_eq!(text, "No books match 'mockingbird'.\n");

        let text = output(|out| search(&session, "Mockingbird", out, OutputFormat::Text));
        assert!(text.contains("Harper Lee"));
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let dir = tempdir().unwrap();
        let mut session = Session::open(CatalogStore::at(dir.path().join("c.txt")), 5).unwrap();

        let mut out = Vec::new();
        let book = Book::new("  ", "Nobody", "None", 1, Money::zero());
        assert!(add(&mut session, book, &mut out, OutputFormat::Text).is_err());
        assert!(session.catalog().is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_value_json() {
        let dir = tempdir().unwrap();
        let session = starter_session(&dir);

        let text = output(|out| value(&session, out, OutputFormat::Json));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        // 50 × 10.99 + 30 × 12.99 + 40 × 9.99
        assert_eq!(json["value_cents"], 54950 + 38970 + 39960);
        assert_eq!(json["copies"], 120);
        assert_eq!(json["books"], 3);
    }
}
