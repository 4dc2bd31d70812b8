//! # MG ERP
//!
//! Service layer for the MG ERP inventory store: configuration, startup
//! bootstrap, per-request units of work, and CSRF verification for front ends.
//!
//! ## Overview
//!
//! - [`InventoryConfig`] - Store location, seed toggle, CSRF settings from the environment
//! - [`Inventory`] - Opens and bootstraps the store, runs units of work off the async runtime
//! - [`CsrfVerifier`] - Token verification, keyed or no-op depending on configuration
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mg_erp::{Inventory, InventoryConfig};
//!
//! async fn example() -> mg_erp::Result<()> {
//!     let inventory = Inventory::open(InventoryConfig::from_env())?;
//!
//!     // One connection per request, released when the closure returns.
//!     let rows = inventory.dashboard().await?;
//!     for row in &rows {
//!         println!("{}", row.to_json());
//!     }
//!
//!     let token = inventory.csrf().issue("session-id");
//!     inventory.csrf().verify("session-id", token.as_str())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `mg_erp::core` - Domain types
//! - `mg_erp::store` - SQLite store, sessions, records

pub mod config;
pub mod csrf;
pub mod error;
pub mod inventory;
pub mod observability;

pub use mg_erp_core as core;
pub use mg_erp_store as store;

pub use config::{CsrfMode, InventoryConfig};
pub use csrf::{CsrfError, CsrfToken, CsrfVerifier, KeyedVerifier, NoopVerifier};
pub use error::{AppError, Result};
pub use inventory::Inventory;

pub use mg_erp_core::{
    NewProduct, NewSale, NewStockMove, Product, ProductId, Sale, SaleId, SeedPolicy, StockMove,
    StockMoveId, StockOrigin,
};
pub use mg_erp_store::{Record, SeedOutcome, Session, SqliteStore, StoreError};
