//! Structured error types for northwind-data.
//!
//! Driver errors propagate verbatim; nothing at this layer swallows or
//! reformats them. User-facing error presentation belongs to the calling
//! tier.

use thiserror::Error;

/// Main error type for repository operations
#[derive(Error, Debug)]
pub enum DbError {
    /// Any SQL-level failure (constraint violation, type mismatch,
    /// disconnected handle) surfaced unchanged from the driver.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// An INSERT expected to return a generated id returned no row.
    /// Raised before any dependent statements are attempted.
    #[error("insert into '{table}' returned no generated id")]
    MissingInsertId { table: &'static str },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl DbError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// Result type alias for repository operations
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_insert_id_display() {
        let err = DbError::MissingInsertId { table: "orders" };
        assert_eq!(
            err.to_string(),
            "insert into 'orders' returned no generated id"
        );
    }

    #[test]
    fn sqlx_error_conversion() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Sqlx(_)));
    }
}
