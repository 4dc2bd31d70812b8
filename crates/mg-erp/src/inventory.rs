//! The Inventory: entry point for front ends.
//!
//! Bootstraps the store from configuration, installs the CSRF verifier, and
//! runs units of work off the async runtime.

use std::sync::Arc;

use mg_erp_core::{Product, Sale};
use mg_erp_store::{Record, SeedOutcome, Session, SqliteStore, StoreError};
use tracing::info;

use crate::config::InventoryConfig;
use crate::csrf::{self, CsrfVerifier};
use crate::error::{AppError, Result};

/// A bootstrapped inventory service.
pub struct Inventory {
    store: Arc<SqliteStore>,
    config: InventoryConfig,
    csrf: Arc<dyn CsrfVerifier>,
    seed_outcome: SeedOutcome,
}

impl Inventory {
    /// Open the configured store, ensure its schema, and apply the seed policy.
    ///
    /// Call once at startup, before serving concurrent units of work.
    pub fn open(config: InventoryConfig) -> Result<Self> {
        config.validate()?;

        let store = SqliteStore::open(&config.db_path)?;
        let seed_outcome = store.bootstrap(config.seed)?;
        let csrf = csrf::verifier_for(&config);

        info!(
            path = %config.db_path.display(),
            csrf = csrf.is_enforcing(),
            "inventory opened"
        );

        Ok(Self {
            store: Arc::new(store),
            config,
            csrf,
            seed_outcome,
        })
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// The CSRF verifier selected at startup.
    pub fn csrf(&self) -> &dyn CsrfVerifier {
        self.csrf.as_ref()
    }

    /// What seeding did during [`Inventory::open`].
    pub fn seed_outcome(&self) -> &SeedOutcome {
        &self.seed_outcome
    }

    /// Run `f` against a fresh session on the blocking pool.
    ///
    /// The session is opened for this call only and closed when `f` returns,
    /// whether it succeeds or fails.
    pub async fn unit_of_work<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> std::result::Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.with_session(f))
            .await
            .map_err(|e| AppError::Task(e.to_string()))?
            .map_err(AppError::from)
    }

    /// Dashboard rows; empty when the schema has not been created.
    pub async fn dashboard(&self) -> Result<Vec<Record>> {
        self.unit_of_work(|session| session.dashboard()).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        self.unit_of_work(|session| session.products()).await
    }

    pub async fn sales(&self) -> Result<Vec<Sale>> {
        self.unit_of_work(|session| session.sales()).await
    }
}
