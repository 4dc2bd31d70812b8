//! Stock movement origins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The reason a stock movement was recorded.
///
/// Stored in `stock_moves.origem` as its tag string. The table carries a CHECK
/// constraint over exactly these tags, so writes that bypass this type are
/// still rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockOrigin {
    /// Manual stock adjustment.
    #[serde(rename = "ajuste")]
    Adjustment,
    /// Deduction caused by a sale.
    #[serde(rename = "venda")]
    Sale,
    /// Correction of a manual adjustment made while editing a product.
    #[serde(rename = "ajuste_edit_prod")]
    AdjustmentEdit,
    /// Correction of a sale deduction made while editing a sale.
    #[serde(rename = "venda_edit")]
    SaleEdit,
}

impl StockOrigin {
    /// Every recognised origin, in schema order.
    pub const ALL: [StockOrigin; 4] = [
        StockOrigin::Adjustment,
        StockOrigin::Sale,
        StockOrigin::AdjustmentEdit,
        StockOrigin::SaleEdit,
    ];

    /// The tag stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adjustment => "ajuste",
            Self::Sale => "venda",
            Self::AdjustmentEdit => "ajuste_edit_prod",
            Self::SaleEdit => "venda_edit",
        }
    }
}

impl fmt::Display for StockOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockOrigin {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|origin| origin.as_str() == s)
            .ok_or_else(|| CoreError::UnknownOrigin(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for origin in StockOrigin::ALL {
            assert_eq!(origin.as_str().parse::<StockOrigin>().unwrap(), origin);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_tag() {
        let err = "invalid_value".parse::<StockOrigin>().unwrap_err();
        assert_eq!(err, CoreError::UnknownOrigin("invalid_value".into()));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("AJUSTE".parse::<StockOrigin>().is_err());
    }

    #[test]
    fn test_serde_uses_stored_tag() {
        let json = serde_json::to_string(&StockOrigin::AdjustmentEdit).unwrap();
        assert_eq!(json, "\"ajuste_edit_prod\"");
    }
}
