//! # Folio CLI Library
//!
//! Everything behind the `folio` binary. `main.rs` only parses arguments
//! and turns errors into exit codes.
//!
//! ## Module Organization
//! ```text
//! folio_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── Layered configuration (defaults, TOML, env)
//! ├── state.rs        ◄─── Session: loaded catalog + its store
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output helpers, dispatch
//! │   ├── book.rs     ◄─── init, list, search, add, value
//! │   └── stock.rs    ◄─── sell, restock, low stock, purchases
//! ├── shell.rs        ◄─── Interactive menu session
//! └── error.rs        ◄─── CliError with exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod shell;
pub mod state;

use anyhow::Context;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use folio_store::CatalogStore;

use cli::{Cli, Command};
use commands::OutputFormat;
use config::AppConfig;
use error::CliError;
use state::Session;

/// Runs the binary against the real terminal.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                         Folio Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → folio.toml → FOLIO_* env → --catalog flag              │
/// │     • Logged through a temporary stderr subscriber (RUST_LOG or info)   │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else logging.filter from config                         │
/// │     • Written to stderr                                                 │
/// │                                                                         │
/// │  3. Open Catalog ─────────────────────────────────────────────────────► │
/// │     • Skipped by `init`                                                 │
/// │     • Missing file handled per catalog.missing_file                     │
/// │                                                                         │
/// │  4. Run Command ──────────────────────────────────────────────────────► │
/// │     • One-shot commands that change the catalog save it afterwards      │
/// │     • Refused after a partial load unless --overwrite-partial           │
/// │     • `shell` saves on exit if anything changed                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        tracing::subscriber::with_default(startup_subscriber(io::stderr), || load_config(&cli))?;
    init_tracing(&config.logging.filter);

    info!(
        catalog = %config.catalog.path.display(),
        command = ?cli.command,
        "Starting folio"
    );

    execute(&cli, &config, io::stdin().lock(), io::stdout().lock())
}

/// Loads configuration and applies the `--catalog` flag on top.
///
/// A file named with `--config` (or `FOLIO_CONFIG`) must load. Without one,
/// a broken default `folio.toml` falls back to the built-in defaults.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(Some(path.clone()))
            .map_err(CliError::from)
            .context("Failed to load configuration")?,
        None => AppConfig::load_or_default(None),
    };

    if let Some(path) = &cli.catalog {
        config.catalog.path = path.clone();
    }
    Ok(config)
}

/// Runs one command with explicit input and output streams.
pub fn execute<R, W>(cli: &Cli, config: &AppConfig, input: R, mut out: W) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let format = OutputFormat::from_json_flag(cli.json);
    let store = CatalogStore::new(config.store_config());

    match &cli.command {
        Command::Init { force } => {
            commands::book::init(&store, *force, &mut out, format)
                .context("Failed to write the starter catalog")?;
        }
        Command::Shell => {
            let mut session = open_session(store, config, cli.overwrite_partial)?;
            shell::run_shell(&mut session, input, &mut out).context("Shell session failed")?;
        }
        command => {
            let mut session = open_session(store, config, cli.overwrite_partial)?;
            if command.is_mutating() {
                session.ensure_saveable()?;
            }
            commands::dispatch(&mut session, command, &mut out, format)?;

            if command.is_mutating() {
                session.save_if_dirty().context("Failed to save the catalog")?;
            }
        }
    }

    out.flush().map_err(CliError::from)?;
    Ok(())
}

fn open_session(
    store: CatalogStore,
    config: &AppConfig,
    overwrite_partial: bool,
) -> anyhow::Result<Session> {
    let path = store.path().to_path_buf();
    let session = Session::open(store, config.report.low_stock_threshold)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to open catalog {}", path.display()))?
        .allow_partial_save(overwrite_partial);

    if let Some(bad) = &session.report().malformed {
        warn!(
            line = bad.line,
            loaded = session.report().loaded,
            overwrite_partial,
            "Catalog only partially loaded"
        );
    }
    Ok(session)
}

/// Subscriber used while the configuration is still being read.
///
/// Honors `RUST_LOG`, otherwise logs at `info`.
pub fn startup_subscriber<W>(make_writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer)
        .with_target(false)
        .finish()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show per-operation debug messages
/// - `RUST_LOG=folio_store=trace` - Trace the store only
/// - Default: `logging.filter` from config (`info`)
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
