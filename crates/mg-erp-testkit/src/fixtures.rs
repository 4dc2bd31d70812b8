//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::PathBuf;

use mg_erp_core::{NewProduct, NewStockMove, ProductId, SeedPolicy, StockOrigin};
use mg_erp_store::{SqliteStore, StoreError};
use tempfile::TempDir;

/// A store in a temporary directory. The directory is removed on drop.
pub struct TestFixture {
    pub dir: TempDir,
    pub store: SqliteStore,
}

impl TestFixture {
    /// A store with the schema created and no data.
    pub fn new() -> Self {
        let fixture = Self::uninitialized();
        fixture
            .store
            .initialize_schema()
            .expect("schema initialization failed");
        fixture
    }

    /// A store whose database file exists but has no tables.
    pub fn uninitialized() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = SqliteStore::open(dir.path().join("erp.db")).expect("failed to open store");
        Self { dir, store }
    }

    /// A store with the schema created and example data seeded.
    pub fn seeded() -> Self {
        let fixture = Self::new();
        fixture
            .store
            .seed(SeedPolicy::Enabled)
            .expect("seeding failed");
        fixture
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Insert a product with the given name and SKU.
    pub fn add_product(&self, name: &str, sku: Option<&str>) -> Result<ProductId, StoreError> {
        let mut product = NewProduct::new(name);
        product.sku = sku.map(str::to_string);
        self.store.with_session(|s| s.insert_product(&product))
    }

    /// Insert a manual adjustment for `product`.
    pub fn adjust_stock(&self, product: ProductId, quantity: i64) -> Result<(), StoreError> {
        let mv = NewStockMove::new(product, StockOrigin::Adjustment, quantity);
        self.store.with_session(|s| s.insert_stock_move(&mv)).map(|_| ())
    }

    /// Row count of a schema table.
    pub fn count(&self, table: &str) -> i64 {
        self.store
            .with_session(|s| s.count(table))
            .expect("count failed")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_starts_empty() {
        let fixture = TestFixture::new();
        assert_eq!(fixture.count("products"), 0);
        assert!(fixture.db_path().exists());
    }

    #[test]
    fn test_seeded_fixture() {
        let fixture = TestFixture::seeded();
        assert_eq!(fixture.count("products"), 2);
        assert_eq!(fixture.count("sales"), 2);
    }

    #[test]
    fn test_adjust_stock() {
        let fixture = TestFixture::new();
        let product = fixture.add_product("A", None).unwrap();
        fixture.adjust_stock(product, 5).unwrap();
        fixture.adjust_stock(product, -2).unwrap();
        let on_hand = fixture
            .store
            .with_session(|s| s.stock_on_hand(product))
            .unwrap();
        assert_eq!(on_hand, 3);
    }
}
