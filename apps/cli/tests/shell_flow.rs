//! End-to-end runs of `folio` commands against a temporary catalog file.

use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

use folio_cli::cli::Cli;
use folio_cli::config::AppConfig;
use folio_cli::error::{CliError, ErrorCode};
use folio_cli::execute;
use folio_store::MissingFile;

struct Fixture {
    dir: TempDir,
    config: AppConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.catalog.path = dir.path().join("catalog.txt");
        Fixture { dir, config }
    }

    fn catalog_path(&self) -> &Path {
        &self.config.catalog.path
    }

    /// Runs `folio <args>` with `input` on stdin and returns stdout.
    fn run(&self, args: &[&str], input: &str) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        execute(&cli, &self.config, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn ok(&self, args: &[&str]) -> String {
        self.run(args, "").unwrap()
    }

    fn err_code(&self, args: &[&str]) -> ErrorCode {
        let err = self.run(args, "").unwrap_err();
        err.downcast_ref::<CliError>()
            .map(|e| e.code)
            .unwrap_or_else(|| panic!("not a CliError: {err:#}"))
    }
}

#[test]
fn test_init_then_list() {
    let fx = Fixture::new();
    fx.ok(&["init"]);

    let listing = fx.ok(&["list"]);
    assert!(listing.contains("The Catcher in the Rye"));
    assert!(listing.contains("To Kill a Mockingbird"));
    assert!(listing.contains("George Orwell"));

    assert_eq!(fx.err_code(&["init"]), ErrorCode::ValidationError);
    fx.ok(&["init", "--force"]);
}

#[test]
fn test_one_shot_sale_is_saved() {
    let fx = Fixture::new();
    fx.ok(&["init"]);

    let out = fx.ok(&["sell", "1984", "10", "--customer", "Bob"]);
    assert_eq!(out, "Sold 10 x '1984' to Bob.\n");

    let contents = fs::read_to_string(fx.catalog_path()).unwrap();
    assert!(contents.contains("1984,George Orwell,Fiction,30,9.99"));
}

#[test]
fn test_failed_sale_leaves_file_alone() {
    let fx = Fixture::new();
    fx.ok(&["init"]);
    let before = fs::read_to_string(fx.catalog_path()).unwrap();

    assert_eq!(
        fx.err_code(&["sell", "1984", "41", "--customer", "Bob"]),
        ErrorCode::InsufficientStock
    );
    assert_eq!(
        fx.err_code(&["sell", "Dune", "1", "--customer", "Bob"]),
        ErrorCode::NotFound
    );
    assert_eq!(fs::read_to_string(fx.catalog_path()).unwrap(), before);
}

#[test]
fn test_add_and_low_stock_json() {
    let fx = Fixture::new();
    fx.ok(&["add", "Dune", "Frank Herbert", "SF", "2", "15.5"]);

    let contents = fs::read_to_string(fx.catalog_path()).unwrap();
    assert_eq!(contents, "Dune,Frank Herbert,SF,2,15.5\n");

    let out = fx.ok(&["--json", "low-stock", "--threshold", "3"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["title"], "Dune");
    assert_eq!(json[0]["price"], "15.5");

    let out = fx.ok(&["--json", "low-stock", "--threshold", "2"]);
    assert_eq!(out.trim(), "[]");
}

#[test]
fn test_missing_file_error_policy() {
    let mut fx = Fixture::new();
    fx.config.catalog.missing_file = MissingFile::Error;

    assert_eq!(fx.err_code(&["list"]), ErrorCode::NotFound);
    assert!(!fx.catalog_path().exists());
}

#[test]
fn test_partial_catalog_still_lists() {
    let fx = Fixture::new();
    fs::write(
        fx.catalog_path(),
        "1984,George Orwell,Fiction,40,9.99\nbroken line\nEmma,Jane Austen,Classic,3,8\n",
    )
    .unwrap();

    let listing = fx.ok(&["list"]);
    assert!(listing.contains("1984"));
    assert!(!listing.contains("Emma"));
}

#[test]
fn test_strict_mode_rejects_partial_catalog() {
    let mut fx = Fixture::new();
    fx.config.catalog.strict = true;
    fs::write(fx.catalog_path(), "1984,George Orwell,Fiction,40,9.99\nbroken line\n").unwrap();

    assert_eq!(fx.err_code(&["list"]), ErrorCode::StorageError);
}

#[test]
fn test_shell_orwell_scenario() {
    let fx = Fixture::new();
    fx.ok(&["add", "1984", "George Orwell", "Fiction", "40", "9.99"]);

    let script = "\
3\n1984\n10\nBob\n\
6\nBob\n\
4\n1984\n5\n\
5\n36\n\
5\n35\n\
9\n";
    let out = fx.run(&["shell"], script).unwrap();

    assert!(out.contains("Sold 10 x '1984' to Bob."));
    assert!(out.contains("Purchases for Bob:\n  1984: 10\n"));
    assert!(out.contains("Restocked '1984' by 5 (now 35)."));
    assert!(out.contains("Books with fewer than 36 copies:"));
    assert!(out.contains("No books have fewer than 35 copies."));
    assert!(out.contains("Saved 1 books"));

    let contents = fs::read_to_string(fx.catalog_path()).unwrap();
    assert_eq!(contents, "1984,George Orwell,Fiction,35,9.99\n");
}

#[test]
fn test_customers_do_not_outlive_the_shell() {
    let fx = Fixture::new();
    fx.ok(&["init"]);

    let out = fx.run(&["shell"], "3\n1984\n2\nAlice\n9\n").unwrap();
    assert!(out.contains("Sold 2 x '1984' to Alice."));

    let out = fx.run(&["shell"], "6\nAlice\n9\n").unwrap();
    assert!(out.contains("error: Customer not found: Alice"));
}

#[test]
fn test_shell_add_then_search() {
    let fx = Fixture::new();
    let script = "7\nEmma\nJane Austen\nClassic\n3\n8\n2\nEm\n8\nq\n";
    let out = fx.run(&["shell"], script).unwrap();

    assert!(out.contains("Added 'Emma'."));
    assert!(out.contains("Jane Austen"));
    assert!(out.contains(&format!(
        "Saved 1 books to {}",
        fx.dir.path().join("catalog.txt").display()
    )));
    assert!(!out.contains("error:"));
}

#[test]
fn test_partial_catalog_refuses_to_save() {
    let fx = Fixture::new();
    let contents = "1984,George Orwell,Fiction,40,9.99\nbroken line\nEmma,Jane Austen,Classic,3,8\n";
    fs::write(fx.catalog_path(), contents).unwrap();

    assert_eq!(
        fx.err_code(&["sell", "1984", "1", "--customer", "Bob"]),
        ErrorCode::ValidationError
    );
    assert_eq!(fs::read_to_string(fx.catalog_path()).unwrap(), contents);

    let out = fx.ok(&["--overwrite-partial", "sell", "1984", "1", "--customer", "Bob"]);
    assert_eq!(out, "Sold 1 x '1984' to Bob.\n");
    assert_eq!(
        fs::read_to_string(fx.catalog_path()).unwrap(),
        "1984,George Orwell,Fiction,39,9.99\n"
    );
}

#[test]
fn test_zero_quantity_sale_does_not_rewrite_the_file() {
    let fx = Fixture::new();
    let contents = "1984,George Orwell,Fiction, 40 ,9.99\n";
    fs::write(fx.catalog_path(), contents).unwrap();

    let out = fx.ok(&["sell", "1984", "0", "--customer", "Bob"]);
    assert_eq!(out, "Sold 0 x '1984' to Bob.\n");
    assert_eq!(fs::read_to_string(fx.catalog_path()).unwrap(), contents);
}
