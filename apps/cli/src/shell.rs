//! # Interactive Shell
//!
//! Menu-driven session over any `BufRead`/`Write` pair.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shell Session                                    │
//! │                                                                         │
//! │  print menu ──► read choice ──► prompt for fields ──► run command      │
//! │       ▲                                                    │           │
//! │       │                 Ok  → command output               │           │
//! │       └──────────────── Err → "error: <message>" ◄─────────┘           │
//! │                                                                         │
//! │  "9" / "q" / end of input:  save if changed, then return               │
//! │  (a partial load refuses the save unless --overwrite-partial)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Customer accounts live in the session catalog, so purchase history
//! is available until the shell exits.

use std::io::{BufRead, Write};
use tracing::{debug, info};

use folio_core::validation::{parse_price, parse_quantity};
use folio_core::Book;

use crate::commands::{book, stock, OutputFormat};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::Session;

const MENU: &str = "\
Options:
  1. List books
  2. Search by title
  3. Sell a book
  4. Restock a book
  5. Low stock report
  6. Customer purchases
  7. Add a book
  8. Save
  9. Exit";

/// What the loop does after a menu choice.
enum Flow {
    Continue,
    Exit,
}

/// Line-oriented prompt reader.
struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Prints `label` and reads one line. `None` at end of input.
    fn ask(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like `ask`, but end of input is an error.
    fn require(&mut self, label: &str) -> CliResult<String> {
        self.ask(label)?
            .ok_or_else(|| CliError::validation("input ended before the prompt was answered"))
    }
}

/// Runs the menu loop until the user exits or the input ends.
///
/// Failed operations print `error: ...` and the loop continues. Only
/// failures to write output stop the session early.
pub fn run_shell<R, W>(session: &mut Session, input: R, out: W) -> CliResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut prompter = Prompter { input, out };
    info!(path = %session.store().path().display(), "Shell session started");

    if let Some(bad) = &session.report().malformed {
        writeln!(
            prompter.out,
            "warning: loading stopped at line {} ({}); {} books loaded",
            bad.line,
            bad.reason,
            session.report().loaded
        )?;
    }

    loop {
        writeln!(prompter.out, "\n{MENU}")?;
        let Some(choice) = prompter.ask("Enter your choice: ")? else {
            writeln!(prompter.out)?;
            break;
        };

        match handle_choice(session, &mut prompter, choice.trim()) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) if err.code == ErrorCode::Internal => return Err(err),
            Err(err) => {
                debug!(code = ?err.code, "Shell operation failed");
                writeln!(prompter.out, "error: {err}")?;
            }
        }
    }

    match session.save_if_dirty() {
        Ok(Some(written)) => writeln!(
            prompter.out,
            "Saved {written} books to {}",
            session.store().path().display()
        )?,
        Ok(None) => {}
        Err(err) if err.code == ErrorCode::ValidationError => {
            writeln!(prompter.out, "error: {err}")?;
            writeln!(prompter.out, "Changes were not saved.")?;
        }
        Err(err) => return Err(err),
    }
    writeln!(prompter.out, "Goodbye.")?;
    info!("Shell session ended");
    Ok(())
}

fn handle_choice<R: BufRead, W: Write>(
    session: &mut Session,
    p: &mut Prompter<R, W>,
    choice: &str,
) -> CliResult<Flow> {
    let text = OutputFormat::Text;

    match choice {
        "1" => book::list(session, &mut p.out, text)?,
        "2" => {
            let needle = p.require("Title contains: ")?;
            book::search(session, &needle, &mut p.out, text)?;
        }
        "3" => {
            let title = p.require("Title: ")?;
            let quantity = parse_quantity(&p.require("Quantity to sell: ")?)?;
            let customer = p.require("Customer name: ")?;
            stock::sell(session, &title, quantity, customer.trim(), &mut p.out, text)?;
        }
        "4" => {
            let title = p.require("Title: ")?;
            let quantity = parse_quantity(&p.require("Quantity to add: ")?)?;
            stock::restock(session, &title, quantity, &mut p.out, text)?;
        }
        "5" => {
            let default = session.low_stock_threshold();
            let answer = p.require(&format!("Threshold [{default}]: "))?;
            let threshold = if answer.trim().is_empty() {
                default
            } else {
                parse_quantity(&answer)?
            };
            stock::low_stock(session, threshold, &mut p.out, text)?;
        }
        "6" => {
            let customer = p.require("Customer name: ")?;
            stock::purchases(session, customer.trim(), &mut p.out, text)?;
        }
        "7" => {
            let title = p.require("Title: ")?;
            let author = p.require("Author: ")?;
            let category = p.require("Category: ")?;
            let quantity = parse_quantity(&p.require("Quantity: ")?)?;
            let price = parse_price(&p.require("Price: ")?)?;
            let new_book = Book::new(title.trim(), author.trim(), category.trim(), quantity, price);
            book::add(session, new_book, &mut p.out, text)?;
        }
        "8" => {
            let written = session.save()?;
            writeln!(
                p.out,
                "Saved {written} books to {}",
                session.store().path().display()
            )?;
        }
        "9" | "q" | "quit" | "exit" => return Ok(Flow::Exit),
        "" => {}
        other => writeln!(p.out, "Invalid choice '{other}'. Try again.")?,
    }

    Ok(Flow::Continue)
}
