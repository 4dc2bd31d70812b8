//! Domain records: what is written to, and read back from, the store.
//!
//! Write models (`New*`) carry only the caller-supplied fields; ids and
//! timestamps are assigned by the store. Read models mirror a stored row.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::origin::StockOrigin;
use crate::types::{ProductId, SaleId, StockMoveId};

/// A product as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub model: Option<String>,
    pub capacity: Option<String>,
    pub color: Option<String>,
    pub sku: Option<String>,
}

/// A product to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub model: Option<String>,
    pub capacity: Option<String>,
    pub color: Option<String>,
    pub sku: Option<String>,
}

impl NewProduct {
    /// Start a product with only its required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            capacity: None,
            color: None,
            sku: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn capacity(mut self, capacity: impl Into<String>) -> Self {
        self.capacity = Some(capacity.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Reject products without a usable name.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyProductName);
        }
        Ok(())
    }
}

/// A sale as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub list_price: f64,
    pub unit_price: f64,
    pub cost_snapshot: f64,
    /// Unset when the row was written with an explicit NULL.
    pub created_at: Option<NaiveDateTime>,
}

/// A sale to be inserted. Prices default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub product_id: ProductId,
    pub list_price: f64,
    pub unit_price: f64,
    pub cost_snapshot: f64,
}

impl NewSale {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            list_price: 0.0,
            unit_price: 0.0,
            cost_snapshot: 0.0,
        }
    }

    pub fn list_price(mut self, price: f64) -> Self {
        self.list_price = price;
        self
    }

    pub fn unit_price(mut self, price: f64) -> Self {
        self.unit_price = price;
        self
    }

    pub fn cost_snapshot(mut self, cost: f64) -> Self {
        self.cost_snapshot = cost;
        self
    }
}

/// A stock movement as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMove {
    pub id: StockMoveId,
    pub product_id: ProductId,
    pub origin: StockOrigin,
    pub quantity: i64,
    pub created_at: Option<NaiveDateTime>,
}

/// A stock movement to be inserted. Positive quantities add stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockMove {
    pub product_id: ProductId,
    pub origin: StockOrigin,
    pub quantity: i64,
}

impl NewStockMove {
    pub fn new(product_id: ProductId, origin: StockOrigin, quantity: i64) -> Self {
        Self {
            product_id,
            origin,
            quantity,
        }
    }

    /// The deduction recorded alongside a sale of `quantity` units.
    pub fn for_sale(product_id: ProductId, quantity: i64) -> Result<Self> {
        if quantity <= 0 {
            return Err(CoreError::NonPositiveQuantity(quantity));
        }
        Ok(Self::new(product_id, StockOrigin::Sale, -quantity))
    }
}
