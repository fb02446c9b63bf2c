//! Schema setup for the order-management tables.
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS` statements, run once at startup
//! (and by the integration tests). Not a migration system; the schema is
//! fixed.

use sqlx::PgPool;

use crate::error::Result;

/// Create the five tables if they don't exist yet.
pub async fn ensure(pool: &PgPool) -> Result<()> {
    tracing::info!("Ensuring order-management schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id TEXT PRIMARY KEY,
            company_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            title TEXT,
            region TEXT,
            hire_date DATE,
            reports_to BIGINT REFERENCES employees(id) ON DELETE SET NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            product_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            customer_id TEXT REFERENCES customers(id),
            employee_id BIGINT REFERENCES employees(id),
            ship_name TEXT,
            ship_city TEXT,
            ship_address TEXT,
            ship_region TEXT,
            ship_country TEXT,
            ship_postal_code TEXT,
            ship_via BIGINT,
            shipped_date DATE,
            required_date DATE,
            freight DOUBLE PRECISION
        )
        "#,
    )
    .execute(pool)
    .await?;

    // order_details.id is the synthesized "<order_id>/<sequence>" key;
    // the sequence starts at 1 per order and is assigned at insert time.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS order_details (
            id TEXT PRIMARY KEY,
            order_id BIGINT NOT NULL REFERENCES orders(id),
            product_id BIGINT NOT NULL REFERENCES products(id),
            unit_price DOUBLE PRECISION NOT NULL,
            quantity INTEGER NOT NULL,
            discount DOUBLE PRECISION NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready");
    Ok(())
}
