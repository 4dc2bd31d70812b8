//! SQLite-backed inventory store.
//!
//! The store itself holds only the database location. Every unit of work
//! opens its own [`Session`], so no connection is ever shared between units.

use std::path::{Path, PathBuf};

use mg_erp_core::SeedPolicy;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::schema::{self, SchemaReport};
use crate::seed::{self, SeedOutcome};
use crate::session::Session;

/// Handle to the database file shared by initialization and runtime.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Point a store at `path`, creating the file if needed.
    ///
    /// Fails with `StorageUnavailable` when the location cannot be opened.
    /// No tables are created; see [`SqliteStore::initialize_schema`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                return Err(StoreError::StorageUnavailable(format!(
                    "{}: directory {} does not exist",
                    path.display(),
                    parent.display()
                )));
            }
        }

        // Probe once so an unusable location fails here rather than on first use.
        Session::open(&path)?;
        Ok(Self { path })
    }

    /// The database file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a session for one unit of work.
    pub fn session(&self) -> Result<Session> {
        Session::open(&self.path)
    }

    /// Run `f` with a fresh session, closing it on every exit path.
    pub fn with_session<F, T, E>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Session) -> std::result::Result<T, E>,
        E: From<StoreError>,
    {
        let mut session = self.session()?;
        f(&mut session)
    }

    /// Create any missing tables. Safe to call on every startup.
    pub fn initialize_schema(&self) -> Result<SchemaReport> {
        self.with_session(|session| schema::initialize(session.connection()))
            .map_err(|err| self.locate(err))
    }

    /// Seed example data into an empty store, if `policy` allows it.
    pub fn seed(&self, policy: SeedPolicy) -> Result<SeedOutcome> {
        self.with_session(|session| seed::seed(session, policy))
            .map_err(|err| self.locate(err))
    }

    /// Initialize the schema, then apply the seed policy.
    pub fn bootstrap(&self, policy: SeedPolicy) -> Result<SeedOutcome> {
        self.initialize_schema()?;
        let outcome = self.seed(policy)?;
        info!(path = %self.path.display(), ?outcome, "store ready");
        Ok(outcome)
    }

    /// Name this store's file in unavailability errors that lack it.
    fn locate(&self, err: StoreError) -> StoreError {
        let path = self.path.display().to_string();
        match err {
            StoreError::StorageUnavailable(msg) if !msg.starts_with(&path) => {
                StoreError::StorageUnavailable(format!("{path}: {msg}"))
            }
            other => other,
        }
    }
}
