//! Error types for MG ERP Core.

use thiserror::Error;

/// Errors raised while building or parsing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown stock origin: {0:?}")]
    UnknownOrigin(String),

    #[error("product name must not be empty")]
    EmptyProductName,

    #[error("sale quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
