//! Command line definition for the `folio` binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use folio_core::validation::{parse_price, parse_quantity};
use folio_core::Money;

/// Folio - bookstore inventory and sales ledger
#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the catalog file (overrides config and FOLIO_CATALOG_PATH)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Path to the folio.toml config file
    #[arg(long, global = true, value_name = "PATH", env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Save a partially loaded catalog anyway, dropping the unread lines
    #[arg(long, global = true)]
    pub overwrite_partial: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the starter catalog
    Init {
        /// Overwrite an existing catalog file
        #[arg(long)]
        force: bool,
    },

    /// Show every book
    List,

    /// Find books whose title contains TEXT (case-sensitive)
    Search {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Add a book to the catalog
    Add {
        title: String,
        author: String,
        category: String,
        #[arg(allow_negative_numbers = true, value_parser = quantity_arg)]
        quantity: u32,
        #[arg(allow_negative_numbers = true, value_parser = price_arg)]
        price: Money,
    },

    /// Sell copies of a book to a customer
    Sell {
        title: String,
        #[arg(allow_negative_numbers = true, value_parser = quantity_arg)]
        quantity: u32,
        /// Customer account the sale is recorded against
        #[arg(long)]
        customer: String,
    },

    /// Add copies to an existing book
    Restock {
        title: String,
        #[arg(allow_negative_numbers = true, value_parser = quantity_arg)]
        quantity: u32,
    },

    /// Show books with fewer copies than the threshold
    LowStock {
        /// Exclusive upper bound (defaults to report.low_stock_threshold)
        #[arg(long, allow_negative_numbers = true, value_parser = quantity_arg)]
        threshold: Option<u32>,
    },

    /// Show the total value of the stock on hand
    Value,

    /// Interactive session (customer history lasts until exit)
    Shell,
}

impl Command {
    /// Returns true for commands that change the catalog.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Sell { .. } | Command::Restock { .. }
        )
    }
}

fn quantity_arg(s: &str) -> Result<u32, String> {
    parse_quantity(s).map_err(|e| e.to_string())
}

fn price_arg(s: &str) -> Result<Money, String> {
    parse_price(s).map_err(|e| e.to_string())
}
