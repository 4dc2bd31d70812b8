//! # MG ERP Core
//!
//! Pure domain types for the MG ERP inventory store: products, sales, and
//! stock movements.
//!
//! This crate contains no I/O and no storage. Persistence lives in
//! `mg-erp-store`; this crate only describes what gets persisted.
//!
//! ## Key Types
//!
//! - [`Product`] / [`NewProduct`] - A sellable item with an optional unique SKU
//! - [`Sale`] / [`NewSale`] - A sale with list/unit/cost pricing snapshots
//! - [`StockMove`] / [`NewStockMove`] - A signed quantity change for a product
//! - [`StockOrigin`] - The closed set of reasons a stock move can carry
//! - [`SeedPolicy`] - Whether example data may be seeded into an empty store

pub mod error;
pub mod model;
pub mod origin;
pub mod seed;
pub mod types;

pub use error::{CoreError, Result};
pub use model::{NewProduct, NewSale, NewStockMove, Product, Sale, StockMove};
pub use origin::StockOrigin;
pub use seed::{seed_products, seed_sales, SeedPolicy, SeedSale};
pub use types::{ProductId, SaleId, StockMoveId};
