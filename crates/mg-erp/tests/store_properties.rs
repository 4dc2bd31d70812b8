//! End-to-end behavior of the inventory store against on-disk databases.

use mg_erp::store::schema;
use mg_erp::{
    Inventory, InventoryConfig, NewProduct, NewSale, NewStockMove, SeedOutcome, SeedPolicy,
    SqliteStore, StockOrigin, StoreError,
};
use mg_erp_testkit::generators::{new_product, products_with_distinct_skus, quantity, stock_origin};
use mg_erp_testkit::TestFixture;
use proptest::prelude::*;

fn schema_sql(store: &SqliteStore) -> Vec<String> {
    store
        .with_session(|s| {
            s.query(
                "SELECT sql FROM sqlite_master WHERE sql IS NOT NULL ORDER BY name",
                [],
            )?
            .iter()
            .map(|r| r.get::<String>("sql"))
            .collect::<Result<Vec<_>, _>>()
        })
        .unwrap()
}

#[test]
fn schema_initialization_is_idempotent() {
    let fixture = TestFixture::uninitialized();

    let first = fixture.store.initialize_schema().unwrap();
    let before = schema_sql(&fixture.store);
    let second = fixture.store.initialize_schema().unwrap();

    assert_eq!(first, second);
    assert_eq!(schema_sql(&fixture.store), before);
    for table in schema::TABLES {
        assert_eq!(fixture.count(table.name), 0);
    }
}

#[test]
fn schema_initialization_keeps_existing_data() {
    let fixture = TestFixture::seeded();
    fixture.store.initialize_schema().unwrap();
    assert_eq!(fixture.count("products"), 2);
    assert_eq!(fixture.count("sales"), 2);
}

#[test]
fn seeding_respects_toggle() {
    let disabled = TestFixture::new();
    assert_eq!(
        disabled.store.seed(SeedPolicy::Disabled).unwrap(),
        SeedOutcome::SkippedDisabled
    );
    assert_eq!(disabled.count("products"), 0);

    let enabled = TestFixture::new();
    assert!(enabled.store.seed(SeedPolicy::default()).unwrap().seeded());
    assert_eq!(enabled.count("products"), 2);
    assert_eq!(enabled.count("sales"), 2);
}

#[test]
fn seeding_does_not_duplicate() {
    let fixture = TestFixture::seeded();
    assert_eq!(
        fixture.store.seed(SeedPolicy::Enabled).unwrap(),
        SeedOutcome::SkippedNotEmpty
    );
    assert_eq!(fixture.count("products"), 2);
    assert_eq!(fixture.count("sales"), 2);
}

#[test]
fn duplicate_sku_is_constraint_violation() {
    let fixture = TestFixture::new();
    fixture.add_product("A", Some("SKU-1")).unwrap();

    let err = fixture.add_product("B", Some("SKU-1")).unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));

    fixture.add_product("C", Some("SKU-2")).unwrap();
    fixture.add_product("D", None).unwrap();
    fixture.add_product("E", None).unwrap();
    assert_eq!(fixture.count("products"), 4);
}

#[test]
fn stock_origin_is_enumerated() {
    let fixture = TestFixture::new();
    let product = fixture.add_product("A", None).unwrap();

    fixture
        .store
        .with_session(|s| {
            s.execute(
                "INSERT INTO stock_moves (product_id, origem, quantidade) VALUES (?1, 'ajuste', 4)",
                [product.get()],
            )
        })
        .unwrap();

    let err = fixture
        .store
        .with_session(|s| {
            s.execute(
                "INSERT INTO stock_moves (product_id, origem, quantidade)
                 VALUES (?1, 'invalid_value', 4)",
                [product.get()],
            )
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
    assert_eq!(fixture.count("stock_moves"), 1);
}

#[test]
fn dashboard_tolerates_missing_tables() {
    let fixture = TestFixture::uninitialized();
    let rows = fixture.store.with_session(|s| s.dashboard()).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn fresh_store_with_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("erp.db");
    let config = InventoryConfig::from_lookup(|name| match name {
        "DB_PATH" => Some(db_path.display().to_string()),
        _ => None,
    });
    assert_eq!(config.seed, SeedPolicy::Enabled);

    let store = SqliteStore::open(&config.db_path).unwrap();
    store.initialize_schema().unwrap();
    store.seed(config.seed).unwrap();

    let (products, sales) = store
        .with_session(|s| Ok::<_, StoreError>((s.products()?, s.sales()?)))
        .unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0].product_id, products[0].id);
    assert_eq!(sales[0].list_price, 2500.0);
    assert_eq!(products[0].sku.as_deref(), Some("XYZ-SLIM-500GB-PT-00001"));
}

#[test]
fn references_must_resolve() {
    let fixture = TestFixture::new();
    let missing = mg_erp::ProductId(404);

    let sale = fixture
        .store
        .with_session(|s| s.insert_sale(&NewSale::new(missing)))
        .unwrap_err();
    assert!(matches!(sale, StoreError::ReferentialViolation(_)));

    let mv = fixture
        .store
        .with_session(|s| {
            s.insert_stock_move(&NewStockMove::new(missing, StockOrigin::Adjustment, 1))
        })
        .unwrap_err();
    assert!(matches!(mv, StoreError::ReferentialViolation(_)));
}

#[test]
fn referenced_products_cannot_be_deleted() {
    let fixture = TestFixture::seeded();
    let products = fixture.store.with_session(|s| s.products()).unwrap();

    let err = fixture
        .store
        .with_session(|s| s.delete_product(products[0].id))
        .unwrap_err();
    assert!(matches!(err, StoreError::ReferentialViolation(_)));
    assert_eq!(fixture.count("products"), 2);
}

#[test]
fn sale_with_stock_updates_on_hand() {
    let fixture = TestFixture::new();
    let product = fixture.add_product("Console XYZ", Some("XYZ-1")).unwrap();
    fixture.adjust_stock(product, 10).unwrap();

    fixture
        .store
        .with_session(|s| {
            s.record_sale(
                &NewSale::new(product)
                    .list_price(2500.0)
                    .unit_price(2400.0)
                    .cost_snapshot(2000.0),
                4,
            )
        })
        .unwrap();

    let on_hand = fixture
        .store
        .with_session(|s| s.stock_on_hand(product))
        .unwrap();
    assert_eq!(on_hand, 6);
    assert_eq!(fixture.count("sales"), 1);
}

#[test]
fn open_under_missing_directory_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteStore::open(dir.path().join("nope").join("erp.db")).unwrap_err();
    assert!(matches!(err, StoreError::StorageUnavailable(_)));
}

#[tokio::test]
async fn inventory_dashboard_after_seed() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = Inventory::open(InventoryConfig {
        db_path: dir.path().join("erp.db"),
        ..InventoryConfig::default()
    })
    .unwrap();

    let rows = inventory.dashboard().await.unwrap();
    assert_eq!(rows.len(), 2);
    // 2899 - 2300 beats 2400 - 2000.
    assert_eq!(rows[0].get::<f64>("lucro_liquido").unwrap(), 599.0);
    assert_eq!(rows[1].get::<f64>("lucro_liquido").unwrap(), 400.0);
    assert_eq!(rows[0].to_json()["nome"], "Console XYZ");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn distinct_skus_always_insert(products in products_with_distinct_skus(4)) {
        let fixture = TestFixture::new();
        for product in &products {
            fixture.store.with_session(|s| s.insert_product(product)).unwrap();
        }
        prop_assert_eq!(fixture.count("products"), 4);
    }

    #[test]
    fn products_roundtrip_through_store(product in new_product()) {
        let fixture = TestFixture::new();
        let id = fixture.store.with_session(|s| s.insert_product(&product)).unwrap();
        let stored = fixture.store.with_session(|s| s.product(id)).unwrap().unwrap();
        prop_assert_eq!(stored.name, product.name);
        prop_assert_eq!(stored.model, product.model);
        prop_assert_eq!(stored.capacity, product.capacity);
        prop_assert_eq!(stored.color, product.color);
    }

    #[test]
    fn stock_on_hand_is_sum_of_moves(
        moves in prop::collection::vec((stock_origin(), quantity()), 0..20)
    ) {
        let fixture = TestFixture::new();
        let product = fixture.store
            .with_session(|s| s.insert_product(&NewProduct::new("A")))
            .unwrap();
        for (origin, qty) in &moves {
            fixture.store
                .with_session(|s| s.insert_stock_move(&NewStockMove::new(product, *origin, *qty)))
                .unwrap();
        }
        let expected: i64 = moves.iter().map(|(_, q)| q).sum();
        let on_hand = fixture.store.with_session(|s| s.stock_on_hand(product)).unwrap();
        prop_assert_eq!(on_hand, expected);
    }
}
