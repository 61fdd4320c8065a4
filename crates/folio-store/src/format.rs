//! # Catalog File Format
//!
//! One line per book, five comma-separated fields in fixed order:
//!
//! ```text
//! title,author,category,quantity,price
//! The Catcher in the Rye,J.D. Salinger,Fiction,50,10.99
//! 1984,George Orwell,Fiction,40,9.99
//! Dune,Frank Herbert,Science Fiction,7,15
//! ```
//!
//! ## Decoding Rules
//! - Blank lines are skipped
//! - Leading whitespace before the title is skipped
//! - A line splits into at most five fields, so a stray comma ends up in
//!   the price field and fails to parse
//! - The first line that does not decode stops the read; later lines
//!   are never looked at
//!
//! ## Known Constraint
//! There is no escaping. A title, author or category containing a comma
//! or a line break cannot round-trip, and neither can a title that starts
//! with whitespace. [`has_unsafe_field`] lets the
//! writer flag such records.

use std::io::{self, BufRead, Write};
use thiserror::Error;

use folio_core::validation::parse_price;
use folio_core::{Book, Money};

/// Separator between the five fields of a record.
pub const FIELD_SEPARATOR: char = ',';

const FIELD_COUNT: usize = 5;

// =============================================================================
// Record Errors
// =============================================================================

/// Why a single line failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer than five fields, or a blank title.
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// Quantity is not a non-negative integer.
    #[error("invalid quantity '{0}'")]
    InvalidQuantity(String),

    /// Price is not a non-negative decimal with at most two fraction digits.
    #[error("invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding,
}

/// The first record that stopped a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number in the file.
    pub line: usize,

    /// What was wrong with it.
    pub reason: RecordError,
}

// =============================================================================
// Encoding
// =============================================================================

/// Renders one book as a record line (without the trailing newline).
pub fn encode_record(book: &Book) -> String {
    format!(
        "{title}{sep}{author}{sep}{category}{sep}{quantity}{sep}{price}",
        title = book.title,
        author = book.author,
        category = book.category,
        quantity = book.quantity,
        price = book.price.to_decimal_string(),
        sep = FIELD_SEPARATOR,
    )
}

/// Returns true when a text field would not survive a reload unchanged.
///
/// Covers separators and line breaks in any text field, and a title with
/// leading whitespace (decoding skips it).
pub fn has_unsafe_field(book: &Book) -> bool {
    book.title.starts_with(char::is_whitespace)
        || [&book.title, &book.author, &book.category]
            .iter()
            .any(|field| field.contains([FIELD_SEPARATOR, '\n', '\r']))
}

/// Writes every book, one record per line.
pub fn write_records<'a, W, I>(mut writer: W, books: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Book>,
{
    let mut written = 0;
    for book in books {
        writeln!(writer, "{}", encode_record(book))?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decodes one record line.
///
/// ## Example
/// ```rust
/// use folio_store::format::decode_record;
///
/// let book = decode_record("  1984,George Orwell,Fiction,40,9.99").unwrap();
/// assert_eq!(book.title, "1984");
/// assert_eq!(book.price.cents(), 999);
/// ```
pub fn decode_record(line: &str) -> Result<Book, RecordError> {
    let mut fields = line.trim_start().splitn(FIELD_COUNT, FIELD_SEPARATOR);

    let title = fields.next().filter(|t| !t.trim().is_empty());
    let title = title.ok_or(RecordError::MissingField("title"))?;
    let author = fields.next().ok_or(RecordError::MissingField("author"))?;
    let category = fields.next().ok_or(RecordError::MissingField("category"))?;
    let quantity = fields.next().ok_or(RecordError::MissingField("quantity"))?;
    let price = fields.next().ok_or(RecordError::MissingField("price"))?;

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidQuantity(quantity.to_string()))?;
    let price: Money = parse_price(price).map_err(|err| RecordError::InvalidPrice {
        value: price.trim().to_string(),
        reason: err.to_string(),
    })?;

    Ok(Book::new(title, author, category, quantity, price))
}

/// Reads records until end of input or the first malformed line.
///
/// Returns the books decoded so far and, if the read stopped early, the
/// record that stopped it. Only genuine I/O failures are errors.
pub fn read_records<R: BufRead>(reader: R) -> io::Result<(Vec<Book>, Option<MalformedRecord>)> {
    let mut books = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                return Ok((
                    books,
                    Some(MalformedRecord {
                        line: line_no,
                        reason: RecordError::Encoding,
                    }),
                ));
            }
            Err(err) => return Err(err),
        };

        if line.trim().is_empty() {
            continue;
        }

        match decode_record(&line) {
            Ok(book) => books.push(book),
            Err(reason) => {
                return Ok((
                    books,
                    Some(MalformedRecord {
                        line: line_no,
                        reason,
                    }),
                ));
            }
        }
    }

    Ok((books, None))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn orwell() -> Book {
        Book::new("1984", "George Orwell", "Fiction", 40, Money::from_cents(999))
    }

    #[test]
    fn test_encode_record() {
        assert_eq!(encode_record(&orwell()), "1984,George Orwell,Fiction,40,9.99");

        let dune = Book::new("Dune", "Frank Herbert", "SF", 0, Money::from_cents(1500));
        assert_eq!(encode_record(&dune), "Dune,Frank Herbert,SF,0,15");

        let emma = Book::new("Emma", "Jane Austen", "Classic", 3, Money::from_cents(1250));
        assert_eq!(encode_record(&emma), "Emma,Jane Austen,Classic,3,12.5");
    }

    #[test]
    fn test_decode_record() {
        assert_eq!(decode_record("1984,George Orwell,Fiction,40,9.99").unwrap(), orwell());
        assert_eq!(decode_record("\t 1984,George Orwell,Fiction,40,9.99").unwrap(), orwell());
        assert_eq!(decode_record("1984,George Orwell,Fiction,40,9.99\r").unwrap(), orwell());
    }

    #[test]
    fn test_decode_keeps_inner_spaces() {
        let book = decode_record("The Road, Cormac McCarthy ,Fiction,2,8").unwrap();
        assert_eq!(book.title, "The Road");
        assert_eq!(book.author, " Cormac McCarthy ");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_record("1984,George Orwell,Fiction"),
            Err(RecordError::MissingField("quantity"))
        );
        assert_eq!(
            decode_record(",George Orwell,Fiction,1,2"),
            Err(RecordError::MissingField("title"))
        );
        assert_eq!(
            decode_record("1984,George Orwell,Fiction,-4,9.99"),
            Err(RecordError::InvalidQuantity("-4".to_string()))
        );
        assert!(matches!(
            decode_record("1984,George Orwell,Fiction,4,free"),
            Err(RecordError::InvalidPrice { value, .. }) if value == "free"
        ));
        // an embedded comma pushes text into the price field
        assert!(matches!(
            decode_record("Guns, Germs, and Steel,Jared Diamond,History,3,18.5"),
            Err(RecordError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_price_error_names_the_decimal_limit() {
        let err = decode_record("1984,George Orwell,Fiction,4,12.345").unwrap_err();
        assert!(matches!(&err, RecordError::InvalidPrice { value, .. } if value == "12.345"));

        let message = err.to_string();
        assert!(message.starts_with("invalid price '12.345': "));
        assert!(message.contains("at most two digits"), "{message}");
    }

    #[test]
    fn test_unsafe_fields() {
        assert!(!has_unsafe_field(&orwell()));
        let comma = Book::new("Guns, Germs", "Jared Diamond", "History", 1, Money::zero());
        assert!(has_unsafe_field(&comma));
        let newline = Book::new("Line\nBreak", "A", "B", 1, Money::zero());
        assert!(has_unsafe_field(&newline));
        let indented = Book::new("  Dune", "Frank Herbert", "SF", 1, Money::zero());
        assert!(has_unsafe_field(&indented));
        assert_eq!(decode_record(&encode_record(&indented)).unwrap().title, "Dune");
    }

    #[test]
    fn test_read_stops_at_first_malformed_line() {
        let input = "\
A,Author,Cat,1,1
B,Author,Cat,2,2.5

C,Author,Cat,x,3
D,Author,Cat,4,4
";
        let (books, malformed) = read_records(Cursor::new(input)).unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(
            malformed,
            Some(MalformedRecord {
                line: 4,
                reason: RecordError::InvalidQuantity("x".to_string()),
            })
        );
    }

    #[test]
    fn test_read_partial_trailing_record() {
        let input = "A,Author,Cat,1,1\nB,Author";
        let (books, malformed) = read_records(Cursor::new(input)).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(malformed.unwrap().line, 2);
    }

    #[test]
    fn test_read_invalid_utf8() {
        let mut input = b"A,Author,Cat,1,1\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        let (books, malformed) = read_records(Cursor::new(input)).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(malformed.unwrap().reason, RecordError::Encoding);
    }

    #[test]
    fn test_write_then_read() {
        let books = vec![
            orwell(),
            Book::new("Dune", "Frank Herbert", "SF", 0, Money::from_cents(1500)),
        ];
        let mut buffer = Vec::new();
        assert_eq!(write_records(&mut buffer, &books).unwrap(), 2);

        let (read, malformed) = read_records(Cursor::new(buffer)).unwrap();
        assert_eq!(read, books);
        assert!(malformed.is_none());
    }
}
