//! Strong identifier types.
//!
//! Row ids are SQLite rowids. They are wrapped in newtypes so a sale id can
//! never be passed where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Get the raw rowid.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

row_id!(
    /// Identifier of a row in `products`.
    ProductId
);

row_id!(
    /// Identifier of a row in `sales`.
    SaleId
);

row_id!(
    /// Identifier of a row in `stock_moves`.
    StockMoveId
);
