//! Proptest generators for property-based testing.

use proptest::prelude::*;

use mg_erp_core::{NewProduct, StockOrigin};

/// Generate a product name.
pub fn product_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9 ]{0,23}".prop_map(String::from)
}

/// Generate a SKU.
pub fn sku() -> impl Strategy<Value = String> {
    "[A-Z]{3}-[A-Z0-9]{2,8}-[0-9]{5}".prop_map(String::from)
}

/// Generate a stock origin.
pub fn stock_origin() -> impl Strategy<Value = StockOrigin> {
    prop_oneof![
        Just(StockOrigin::Adjustment),
        Just(StockOrigin::Sale),
        Just(StockOrigin::AdjustmentEdit),
        Just(StockOrigin::SaleEdit),
    ]
}

/// Generate a signed stock quantity.
pub fn quantity() -> impl Strategy<Value = i64> {
    -1_000i64..=1_000i64
}

/// Generate a price with cent precision.
pub fn price() -> impl Strategy<Value = f64> {
    (0u32..=1_000_000u32).prop_map(|cents| f64::from(cents) / 100.0)
}

/// Generate a product with optional attributes. The SKU is left unset.
pub fn new_product() -> impl Strategy<Value = NewProduct> {
    (
        product_name(),
        proptest::option::of("[A-Za-z]{1,10}"),
        proptest::option::of("[0-9]{1,4}(GB|TB)"),
        proptest::option::of("[A-Za-z]{3,10}"),
    )
        .prop_map(|(name, model, capacity, color)| NewProduct {
            name,
            model,
            capacity,
            color,
            sku: None,
        })
}

/// Generate `count` products with pairwise-distinct SKUs.
pub fn products_with_distinct_skus(count: usize) -> impl Strategy<Value = Vec<NewProduct>> {
    (
        prop::collection::vec(new_product(), count),
        prop::collection::hash_set(sku(), count),
    )
        .prop_map(|(products, skus)| {
            products
                .into_iter()
                .zip(skus)
                .map(|(mut product, sku)| {
                    product.sku = Some(sku);
                    product
                })
                .collect()
        })
}
