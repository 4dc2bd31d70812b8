//! Error types for the store module.

use std::error::Error as _;

use mg_erp_core::CoreError;
use rusqlite::{ffi, ErrorCode};
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// Raw `rusqlite::Error`s are classified on conversion, so `?` on any
/// rusqlite call yields the matching kind.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage location cannot be opened or created.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A unique, check, or not-null constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A row references a product that does not exist, or a referenced
    /// product was about to be removed.
    #[error("referential violation: {0}")]
    ReferentialViolation(String),

    /// A schema statement failed.
    #[error("schema error on table {table}: {message}")]
    Schema { table: &'static str, message: String },

    /// A query touched a table that has not been created yet.
    #[error("missing table: {0}")]
    MissingTable(String),

    /// A table name outside the known schema.
    #[error("unknown table: {0}")]
    UnknownTable(String),

    /// Invalid domain value.
    #[error("invalid data: {0}")]
    Core(#[from] CoreError),

    /// Any other database error.
    #[error("database error: {0}")]
    Database(rusqlite::Error),
}

impl StoreError {
    pub fn is_missing_table(&self) -> bool {
        matches!(self, StoreError::MissingTable(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        // Prepare-time failures may arrive as `SqlInputError`; both variants
        // expose the SQLite code as their source.
        let Some((code, extended_code)) = err
            .source()
            .and_then(|source| source.downcast_ref::<ffi::Error>())
            .map(|e| (e.code, e.extended_code))
        else {
            return StoreError::Database(err);
        };
        let message = err.to_string();

        match code {
            ErrorCode::ConstraintViolation if extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                StoreError::ReferentialViolation(message)
            }
            ErrorCode::ConstraintViolation => StoreError::ConstraintViolation(message),
            ErrorCode::CannotOpen
            | ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::NotADatabase => StoreError::StorageUnavailable(message),
            ErrorCode::Unknown if message.contains("no such table") => {
                StoreError::MissingTable(missing_table_name(&message))
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Pull the table name out of "no such table: <name>".
fn missing_table_name(message: &str) -> String {
    message
        .split("no such table:")
        .nth(1)
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or(message)
        .to_string()
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
