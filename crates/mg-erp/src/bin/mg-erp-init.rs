//! Create or update the ERP database and optionally seed example data.
//!
//! Reads `DB_PATH` and `SEED_DB` from the environment, the same way the
//! service does.

use anyhow::Context;
use mg_erp::{InventoryConfig, SeedOutcome, SqliteStore};

fn main() -> anyhow::Result<()> {
    mg_erp::observability::init();

    let config = InventoryConfig::from_env();
    let path = config.db_path.display().to_string();

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open database at {path}"))?;
    let outcome = store
        .bootstrap(config.seed)
        .with_context(|| format!("failed to initialize database at {path}"))?;

    if let SeedOutcome::Seeded { products, sales } = &outcome {
        tracing::info!(products = products.len(), sales = sales.len(), "example data seeded");
    }

    println!("ERP database created/updated at: {path}");
    Ok(())
}
