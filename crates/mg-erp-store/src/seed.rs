//! Example data for an empty store.

use mg_erp_core::{seed_products, seed_sales, NewSale, ProductId, SaleId, SeedPolicy};
use tracing::{info, warn};

use crate::error::Result;
use crate::session::{insert_product, insert_sale, Session};

/// What a seeding attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Example rows were written.
    Seeded {
        products: Vec<ProductId>,
        sales: Vec<SaleId>,
    },
    /// Seeding is turned off.
    SkippedDisabled,
    /// The products table already has rows.
    SkippedNotEmpty,
}

impl SeedOutcome {
    pub fn seeded(&self) -> bool {
        matches!(self, SeedOutcome::Seeded { .. })
    }
}

/// Seed example products and sales if `policy` allows it and the store has
/// no products yet.
///
/// All rows are committed together or not at all. Stock movements are not
/// seeded.
pub fn seed(session: &mut Session, policy: SeedPolicy) -> Result<SeedOutcome> {
    if !policy.is_enabled() {
        info!("seeding disabled");
        return Ok(SeedOutcome::SkippedDisabled);
    }

    let tx = session.connection_mut().transaction()?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
    if existing > 0 {
        info!(existing, "store already has products, not seeding");
        return Ok(SeedOutcome::SkippedNotEmpty);
    }

    let products = seed_products()
        .iter()
        .map(|product| insert_product(&tx, product))
        .collect::<Result<Vec<_>>>()?;

    let mut sales = Vec::new();
    for sale in seed_sales() {
        let Some(&product_id) = products.get(sale.product) else {
            warn!(index = sale.product, "seed sale references no seeded product");
            continue;
        };
        let new_sale = NewSale::new(product_id)
            .list_price(sale.list_price)
            .unit_price(sale.unit_price)
            .cost_snapshot(sale.cost_snapshot);
        sales.push(insert_sale(&tx, &new_sale)?);
    }

    tx.commit()?;

    info!(products = products.len(), sales = sales.len(), "seeded example data");
    Ok(SeedOutcome::Seeded { products, sales })
}
