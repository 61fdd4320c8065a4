//! # Session State
//!
//! The catalog a command (or a whole shell session) works on, together
//! with the store it came from.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session Lifecycle                                │
//! │                                                                         │
//! │  Session::open(store, threshold)                                       │
//! │       │   store.load()  → catalog + LoadReport                         │
//! │       ▼                                                                 │
//! │  session.update(|catalog| catalog.sell(...))                           │
//! │       │   Ok, books changed → dirty = true                             │
//! │       │   Err → catalog unchanged, dirty untouched                     │
//! │       ▼                                                                 │
//! │  session.save_if_dirty()                                               │
//! │       │   partial load → refused unless allow_partial_save             │
//! │       │   dirty → store.save(&catalog), dirty = false                  │
//! │       ▼                                                                 │
//! │  dropped (customers go with it)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use folio_core::{Catalog, CoreResult};
use folio_store::{CatalogStore, LoadReport, LoadSource, StoreResult};

use crate::error::{CliError, CliResult};

/// A loaded catalog with its backing store.
#[derive(Debug)]
pub struct Session {
    store: CatalogStore,
    catalog: Catalog,
    report: LoadReport,
    low_stock_threshold: u32,

    /// Save even though the load stopped at a malformed line.
    allow_partial_save: bool,

    /// Catalog changed since the last load or save.
    dirty: bool,
}

impl Session {
    /// Loads the catalog from `store`.
    pub fn open(store: CatalogStore, low_stock_threshold: u32) -> StoreResult<Self> {
        let (catalog, report) = store.load()?;
        Ok(Session {
            store,
            catalog,
            report,
            low_stock_threshold,
            allow_partial_save: false,
            dirty: false,
        })
    }

    /// Wraps an in-memory catalog that has not been saved yet.
    pub fn with_catalog(store: CatalogStore, catalog: Catalog, low_stock_threshold: u32) -> Self {
        let report = LoadReport {
            source: LoadSource::Missing,
            loaded: 0,
            malformed: None,
        };
        Session {
            store,
            catalog,
            report,
            low_stock_threshold,
            allow_partial_save: false,
            dirty: true,
        }
    }

    /// Lets saves go through after a partial load, dropping the unread lines.
    pub fn allow_partial_save(mut self, allow: bool) -> Self {
        self.allow_partial_save = allow;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Report from the initial load.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Default threshold for low stock reports.
    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs a catalog operation.
    ///
    /// The session becomes dirty only when the operation succeeds and the
    /// book list differs afterwards. Customer history is never saved, so a
    /// sale of zero copies leaves the session clean.
    pub fn update<T, F>(&mut self, op: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Catalog) -> CoreResult<T>,
    {
        let before = self.catalog.list().to_vec();
        let value = op(&mut self.catalog)?;
        if self.catalog.list() != before.as_slice() {
            self.dirty = true;
        }
        Ok(value)
    }

    /// Fails when saving would drop records the load never reached.
    pub fn ensure_saveable(&self) -> CliResult<()> {
        match &self.report.malformed {
            Some(bad) if !self.allow_partial_save => Err(CliError::validation(format!(
                "catalog was only partially loaded (stopped at line {}); saving would drop \
                 the unread lines. Fix the file or pass --overwrite-partial",
                bad.line
            ))),
            _ => Ok(()),
        }
    }

    /// Saves unconditionally. Returns the number of records written.
    pub fn save(&mut self) -> CliResult<usize> {
        self.ensure_saveable()?;
        let written = self.store.save(&self.catalog)?;
        self.dirty = false;
        Ok(written)
    }

    /// Saves only when something changed.
    pub fn save_if_dirty(&mut self) -> CliResult<Option<usize>> {
        if !self.dirty {
            debug!("Catalog unchanged, skipping save");
            return Ok(None);
        }
        self.save().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::starter_books;
    use tempfile::tempdir;

    #[test]
    fn test_failed_update_keeps_session_clean() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));
        store.save(&Catalog::with_books(starter_books())).unwrap();

        let mut session = Session::open(store, 5).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.report().loaded, 3);

        assert!(session.update(|c| c.sell("1984", 41, "Bob")).is_err());
        assert!(!session.is_dirty());

        session.update(|c| c.sell("1984", 1, "Bob")).unwrap();
        assert!(session.is_dirty());
    }

    #[test]
    fn test_zero_quantity_sale_keeps_session_clean() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));
        store.save(&Catalog::with_books(starter_books())).unwrap();

        let mut session = Session::open(store, 5).unwrap();
        session.update(|c| c.sell("1984", 0, "Alice")).unwrap();
        assert!(!session.is_dirty());
        assert!(session.catalog().customer("Alice").is_some());

        session.update(|c| c.restock("1984", 0)).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.save_if_dirty().unwrap(), None);
    }

    #[test]
    fn test_partial_load_refuses_to_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.txt");
        let contents = "1984,George Orwell,Fiction,40,9.99\nbroken line\nEmma,Jane Austen,Classic,3,8\n";
        std::fs::write(&path, contents).unwrap();

        let mut session = Session::open(CatalogStore::at(&path), 5).unwrap();
        session.update(|c| c.restock("1984", 1)).unwrap();

        let err = session.save_if_dirty().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(err.message.contains("line 2"));
        assert!(err.message.contains("--overwrite-partial"));
        assert!(session.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);

        let mut session = session.allow_partial_save(true);
        assert_eq!(session.save_if_dirty().unwrap(), Some(1));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "1984,George Orwell,Fiction,41,9.99\n"
        );
    }

    #[test]
    fn test_save_if_dirty() {
        let dir = tempdir().unwrap();
        let store = CatalogStore::at(dir.path().join("catalog.txt"));
        let mut session = Session::with_catalog(store, Catalog::with_books(starter_books()), 5);

        assert_eq!(session.save_if_dirty().unwrap(), Some(3));
        assert_eq!(session.save_if_dirty().unwrap(), None);
        assert!(session.store().exists());
    }
}
