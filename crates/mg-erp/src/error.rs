//! Error types for the service layer.

use mg_erp_store::StoreError;
use thiserror::Error;

use crate::csrf::CsrfError;

/// Errors that can occur in service-layer operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// CSRF verification failed.
    #[error("csrf error: {0}")]
    Csrf(#[from] CsrfError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A blocking unit of work panicked or was cancelled.
    #[error("unit of work failed: {0}")]
    Task(String),
}

/// Result type for service-layer operations.
pub type Result<T> = std::result::Result<T, AppError>;
