//! # MG ERP Store
//!
//! SQLite persistence for products, sales, and stock movements.
//!
//! ## Overview
//!
//! [`SqliteStore`] owns the database location and the schema/seed lifecycle.
//! Work against the data happens through a [`Session`]: one connection per
//! unit of work, owned by the caller and closed on drop.
//!
//! ## Key Types
//!
//! - [`SqliteStore`] - Database location, schema initialization, seeding
//! - [`Session`] - A scoped connection with typed and raw operations
//! - [`Record`] - A result row addressable by column name
//! - [`StoreError`] - Classified storage failures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mg_erp_core::{NewProduct, SeedPolicy};
//! use mg_erp_store::SqliteStore;
//!
//! fn example() -> mg_erp_store::Result<()> {
//!     let store = SqliteStore::open("erp.db")?;
//!     store.initialize_schema()?;
//!     store.seed(SeedPolicy::Enabled)?;
//!
//!     let products = store.with_session(|session| {
//!         session.insert_product(&NewProduct::new("Cabo HDMI").sku("HDMI-2M"))?;
//!         session.products()
//!     })?;
//!     println!("{} products", products.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent schema**: every table uses `CREATE TABLE IF NOT EXISTS`
//! - **Independent tables**: one failing table does not stop the others
//! - **Enforced references**: foreign keys are on for every session, so
//!   products with sales or stock movements cannot be deleted
//! - **Missing tables**: surfaced as [`StoreError::MissingTable`]; only the
//!   dashboard read recovers from it

pub mod error;
pub mod record;
pub mod schema;
pub mod seed;
pub mod session;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use record::Record;
pub use schema::{SchemaReport, TableDef, TABLES};
pub use seed::SeedOutcome;
pub use session::Session;
pub use sqlite::SqliteStore;
