//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DataConfig;

/// Create a PostgreSQL connection pool from the loaded configuration.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(config: &DataConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(&config.database_url, config.max_connections).await
}

/// Create a PostgreSQL connection pool with explicit options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "creating connection pool");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
