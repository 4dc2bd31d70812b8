//! Example data for bootstrapping an empty store.

use serde::{Deserialize, Serialize};

use crate::model::NewProduct;

/// Whether example data may be written into an empty store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    #[default]
    Enabled,
    Disabled,
}

impl SeedPolicy {
    /// Resolve the policy from a toggle value.
    ///
    /// Only an explicit negative (`0`, `false`, `no`, `off`, any case) disables
    /// seeding; an absent or unrecognised value leaves it enabled.
    pub fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some(v) if is_negative_flag(v) => Self::Disabled,
            _ => Self::Enabled,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Whether a toggle value is an explicit "off".
pub fn is_negative_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// A seeded sale. `product` indexes into [`seed_products`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedSale {
    pub product: usize,
    pub list_price: f64,
    pub unit_price: f64,
    pub cost_snapshot: f64,
}

/// The example products, in insertion order.
pub fn seed_products() -> [NewProduct; 2] {
    [
        NewProduct::new("Console XYZ")
            .model("Slim")
            .capacity("500GB")
            .color("Preto")
            .sku("XYZ-SLIM-500GB-PT-00001"),
        NewProduct::new("Console XYZ")
            .model("Slim")
            .capacity("1TB")
            .color("Preto")
            .sku("XYZ-SLIM-1TB-PT-00001"),
    ]
}

/// The example sales, one per seeded product.
pub const fn seed_sales() -> [SeedSale; 2] {
    [
        SeedSale {
            product: 0,
            list_price: 2500.0,
            unit_price: 2400.0,
            cost_snapshot: 2000.0,
        },
        SeedSale {
            product: 1,
            list_price: 3000.0,
            unit_price: 2899.0,
            cost_snapshot: 2300.0,
        },
    ]
}
