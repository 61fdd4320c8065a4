//! # Catalog Store
//!
//! Loads and saves a [`Catalog`]'s books to a single text file.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog File Lifecycle                             │
//! │                                                                         │
//! │  App Startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← missing-file policy, strict mode             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::load_into(&mut catalog)                                 │
//! │       │   file missing?  ──► Empty policy: no books, report.source     │
//! │       │                  ──► Error policy: StoreError::NotFound        │
//! │       │   bad line?      ──► report.malformed (or Malformed if strict) │
//! │       ▼                                                                 │
//! │  ... operations mutate the catalog in memory ...                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::save(&catalog)                                          │
//! │       write catalog.txt.tmp → flush → fsync → rename over catalog.txt  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only books are persisted. Customer accounts live for the process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use folio_core::{Book, Catalog};

use crate::error::{StoreError, StoreResult};
use crate::format::{self, MalformedRecord};
use crate::fs::{rename_with_fallback, temp_path_for};

// =============================================================================
// Configuration
// =============================================================================

/// What loading does when the catalog file is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFile {
    /// Start with an empty catalog.
    #[default]
    Empty,

    /// Report [`StoreError::NotFound`].
    Error,
}

impl fmt::Display for MissingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFile::Empty => write!(f, "empty"),
            MissingFile::Error => write!(f, "error"),
        }
    }
}

impl FromStr for MissingFile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(MissingFile::Empty),
            "error" => Ok(MissingFile::Error),
            other => Err(format!("unknown missing-file policy '{other}' (expected empty or error)")),
        }
    }
}

/// Store configuration.
///
/// ## Example
/// ```rust
/// use folio_store::{MissingFile, StoreConfig};
///
/// let config = StoreConfig::new("/tmp/catalog.txt")
///     .missing_file(MissingFile::Error)
///     .strict(true);
/// assert!(config.strict);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the catalog file.
    pub path: PathBuf,

    /// Policy for a missing file.
    /// Default: `MissingFile::Empty`
    pub missing_file: MissingFile,

    /// Turn the first malformed record into an error instead of a
    /// truncated load.
    /// Default: false
    pub strict: bool,
}

impl StoreConfig {
    /// Creates a configuration for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            missing_file: MissingFile::default(),
            strict: false,
        }
    }

    /// Sets the missing-file policy.
    pub fn missing_file(mut self, policy: MissingFile) -> Self {
        self.missing_file = policy;
        self
    }

    /// Sets strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

// =============================================================================
// Load Report
// =============================================================================

/// Where the loaded books came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The catalog file was read.
    File,

    /// The file was absent and the `Empty` policy applied.
    Missing,
}

/// Outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,

    /// Records accepted.
    pub loaded: usize,

    /// First record that stopped the read, if any.
    pub malformed: Option<MalformedRecord>,
}

impl LoadReport {
    /// True when the whole file was read (or there was no file).
    pub fn is_complete(&self) -> bool {
        self.malformed.is_none()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle on one catalog file.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    config: StoreConfig,
}

impl CatalogStore {
    /// Creates a store from a configuration. Touches nothing on disk.
    pub fn new(config: StoreConfig) -> Self {
        CatalogStore { config }
    }

    /// Shorthand for a store with default settings.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreConfig::new(path))
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Returns true if the catalog file exists.
    pub fn exists(&self) -> bool {
        self.config.path.exists()
    }

    /// Reads the books in the file without touching any catalog.
    pub fn read_books(&self) -> StoreResult<(Vec<Book>, LoadReport)> {
        let path = &self.config.path;

        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return match self.config.missing_file {
                    MissingFile::Empty => {
                        debug!(path = %path.display(), "Catalog file not found, starting empty");
                        Ok((
                            Vec::new(),
                            LoadReport {
                                source: LoadSource::Missing,
                                loaded: 0,
                                malformed: None,
                            },
                        ))
                    }
                    MissingFile::Error => Err(StoreError::NotFound(path.clone())),
                };
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        let (books, malformed) =
            format::read_records(BufReader::new(file)).map_err(|e| StoreError::io(path, e))?;

        if let Some(record) = &malformed {
            if self.config.strict {
                return Err(StoreError::Malformed {
                    line: record.line,
                    reason: record.reason.clone(),
                });
            }
            warn!(
                path = %path.display(),
                line = record.line,
                reason = %record.reason,
                loaded = books.len(),
                "Stopped loading at malformed record; later lines were skipped"
            );
        }

        let report = LoadReport {
            source: LoadSource::File,
            loaded: books.len(),
            malformed,
        };
        Ok((books, report))
    }

    /// Replaces the catalog's books with the file contents.
    ///
    /// Customers are left alone. On error the catalog is unchanged.
    pub fn load_into(&self, catalog: &mut Catalog) -> StoreResult<LoadReport> {
        let (books, report) = self.read_books()?;
        catalog.replace_books(books);
        info!(
            path = %self.config.path.display(),
            loaded = report.loaded,
            complete = report.is_complete(),
            "Catalog loaded"
        );
        Ok(report)
    }

    /// Loads into a fresh catalog.
    pub fn load(&self) -> StoreResult<(Catalog, LoadReport)> {
        let mut catalog = Catalog::new();
        let report = self.load_into(&mut catalog)?;
        Ok((catalog, report))
    }

    /// Writes every book to the file, replacing it atomically.
    ///
    /// Returns the number of records written.
    pub fn save(&self, catalog: &Catalog) -> StoreResult<usize> {
        let path = &self.config.path;

        for book in catalog.list().iter().filter(|b| format::has_unsafe_field(b)) {
            warn!(
                title = %book.title,
                "Record contains a comma or line break and will not load back correctly"
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let temp = temp_path_for(path);
        let written = write_file(&temp, catalog).map_err(|e| {
            let _ = fs::remove_file(&temp);
            StoreError::io(&temp, e)
        })?;
        rename_with_fallback(&temp, path).map_err(|e| StoreError::io(path, e))?;

        info!(path = %path.display(), records = written, "Catalog saved");
        Ok(written)
    }
}

fn write_file(path: &Path, catalog: &Catalog) -> std::io::Result<usize> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let written = format::write_records(&mut writer, catalog.list())?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(written)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RecordError;
    use folio_core::{starter_books, Money};
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));

        let mut original = Catalog::with_books(starter_books());
        original
            .add(Book::new("Emma", "Jane Austen", "Classic", 0, Money::from_cents(1250)))
            .unwrap();

        assert_eq!(store.save(&original).unwrap(), 4);

        let (loaded, report) = store.load().unwrap();
        assert_eq!(loaded.list(), original.list());
        assert_eq!(report.source, LoadSource::File);
        assert_eq!(report.loaded, 4);
        assert!(report.is_complete());
    }

    #[test]
    fn test_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        CatalogStore::at(&path)
            .save(&Catalog::with_books(starter_books()))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "The Catcher in the Rye,J.D. Salinger,Fiction,50,10.99\n\
             To Kill a Mockingbird,Harper Lee,Fiction,30,12.99\n\
             1984,George Orwell,Fiction,40,9.99\n"
        );
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("nested/deeper/catalog.txt"));
        store.save(&Catalog::new()).unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_missing_file_empty_policy() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("absent.txt"));

        let (catalog, report) = store.load().unwrap();
        assert!(catalog.is_empty());
        assert_eq!(report.source, LoadSource::Missing);
        assert_eq!(report.loaded, 0);
    }

    #[test]
    fn test_missing_file_error_policy() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("absent.txt")).missing_file(MissingFile::Error);
        let err = CatalogStore::new(config).load().unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_partial_load_reports_first_bad_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        fs::write(&path, "A,x,y,1,1\nB,x,y,2,2\nC,x,y\nD,x,y,4,4\n").unwrap();

        let (catalog, report) = CatalogStore::at(&path).load().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(report.loaded, 2);
        assert_eq!(
            report.malformed,
            Some(MalformedRecord {
                line: 3,
                reason: RecordError::MissingField("quantity"),
            })
        );
    }

    #[test]
    fn test_strict_mode_rejects_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        fs::write(&path, "A,x,y,1,1\nB,x,y,oops,2\n").unwrap();

        let store = CatalogStore::new(StoreConfig::new(&path).strict(true));
        let mut catalog = Catalog::with_books(starter_books());
        let err = store.load_into(&mut catalog).unwrap_err();

        assert!(matches!(err, StoreError::Malformed { line: 2, .. }));
        assert_eq!(catalog.len(), 3, "failed load must not touch the catalog");
    }

    #[test]
    fn test_load_replaces_books_keeps_customers() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));
        store.save(&Catalog::with_books(starter_books())).unwrap();

        let mut catalog = Catalog::with_books(vec![Book::new("Dune", "F", "SF", 9, Money::zero())]);
        catalog.sell("Dune", 1, "Alice").unwrap();

        store.load_into(&mut catalog).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.book("Dune").is_none());
        assert!(catalog.customer("Alice").is_some());
    }

    #[test]
    fn test_missing_file_policy_parsing() {
        assert_eq!("empty".parse::<MissingFile>().unwrap(), MissingFile::Empty);
        assert_eq!(" ERROR ".parse::<MissingFile>().unwrap(), MissingFile::Error);
        assert!("ignore".parse::<MissingFile>().is_err());
        assert_eq!(MissingFile::Error.to_string(), "error");
    }
}
