//! Order repository
//!
//! Paginated listing with joined display names, single fetch with computed
//! subtotal, line-item fetch, and transactional create/update/delete of an
//! order together with its line items.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Row};

use crate::error::{DbError, Result};
use crate::models::{
    NewOrder, NewOrderDetail, OrderDetailPatch, OrderFields, OrderListOptions, OrderSortColumn,
    Paginated,
};

/// Order header row, enriched with customer/employee display names
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: Option<String>,
    pub employee_id: Option<i64>,
    pub customer_name: Option<String>,
    pub employee_name: Option<String>,
    pub ship_name: Option<String>,
    pub ship_city: Option<String>,
    pub ship_address: Option<String>,
    pub ship_region: Option<String>,
    pub ship_country: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_via: Option<i64>,
    pub shipped_date: Option<NaiveDate>,
    pub required_date: Option<NaiveDate>,
    pub freight: Option<f64>,
}

/// Order with its derived subtotal for single-order display.
///
/// `subtotal` is NULL for an order without line items; it is computed,
/// never stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderWithSubtotal {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub subtotal: Option<f64>,
}

/// Line-item row with joined product name and derived line price
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderDetail {
    pub id: String,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub unit_price: f64,
    pub quantity: i32,
    pub discount: f64,
    /// `unit_price * quantity`, gross of discount
    pub price: f64,
}

const GET_ORDER_SQL: &str = r#"
    SELECT
        o.id,
        o.customer_id,
        o.employee_id,
        c.company_name AS customer_name,
        e.first_name || ' ' || e.last_name AS employee_name,
        o.ship_name,
        o.ship_city,
        o.ship_address,
        o.ship_region,
        o.ship_country,
        o.ship_postal_code,
        o.ship_via,
        o.shipped_date,
        o.required_date,
        o.freight,
        (
            SELECT SUM(d.unit_price * d.quantity * (1 - d.discount))
            FROM order_details d
            WHERE d.order_id = o.id
        ) AS subtotal
    FROM orders o
    LEFT JOIN customers c ON c.id = o.customer_id
    LEFT JOIN employees e ON e.id = o.employee_id
    WHERE o.id = $1
"#;

// Line items ordered by insertion: the sequence is the numeric suffix of the
// synthesized id, so a plain ORDER BY d.id would go lexicographic past 9.
const GET_DETAILS_SQL: &str = r#"
    SELECT
        d.id,
        d.order_id,
        d.product_id,
        p.product_name,
        d.unit_price,
        d.quantity,
        d.discount,
        d.unit_price * d.quantity AS price
    FROM order_details d
    LEFT JOIN products p ON p.id = d.product_id
    WHERE d.order_id = $1
    ORDER BY split_part(d.id, '/', 2)::int
"#;

/// Synthesized line-item key: `"<order_id>/<n>"`, n starting at 1.
fn detail_id(order_id: i64, n: usize) -> String {
    format!("{}/{}", order_id, n)
}

/// Order repository
pub struct OrderRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders with customer/employee display names.
    ///
    /// Single query: LEFT JOINs for the names, `COUNT(*) OVER()` for the
    /// total, bound LIMIT/OFFSET for the page window. An optional customer
    /// filter is a bound parameter. The ORDER BY fragment comes from the
    /// allow-list enums only; a secondary `o.id` key keeps pages disjoint
    /// and contiguous when the sort column has ties.
    ///
    /// The total rides along as a window function, so a page past the last
    /// row comes back with no rows to read it from and reports `total: 0`;
    /// `Paginated` navigation helpers are only meaningful for in-range
    /// pages.
    pub async fn list(&self, opts: OrderListOptions) -> Result<Paginated<Order>> {
        let sort = opts.sort.unwrap_or_default();
        let query = format!(
            r#"
            SELECT
                o.id,
                o.customer_id,
                o.employee_id,
                c.company_name AS customer_name,
                e.first_name || ' ' || e.last_name AS employee_name,
                o.ship_name,
                o.ship_city,
                o.ship_address,
                o.ship_region,
                o.ship_country,
                o.ship_postal_code,
                o.ship_via,
                o.shipped_date,
                o.required_date,
                o.freight,
                COUNT(*) OVER() AS total
            FROM orders o
            LEFT JOIN customers c ON c.id = o.customer_id
            LEFT JOIN employees e ON e.id = o.employee_id
            WHERE $1::text IS NULL OR o.customer_id = $1
            ORDER BY {sort} {direction}, o.id ASC
            LIMIT $2 OFFSET $3
            "#,
            sort = sort.as_sql(),
            direction = opts.direction.as_sql(),
        );

        let rows = sqlx::query(&query)
            .bind(opts.customer_id.as_deref())
            .bind(opts.page.limit() as i64)
            .bind(opts.page.offset() as i64)
            .fetch_all(self.pool)
            .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .iter()
            .map(Order::from_row)
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

        Ok(Paginated {
            items,
            total,
            page: opts.page.page,
            per_page: opts.page.per_page,
        })
    }

    /// List one customer's orders, sorted by shipped_date unless the caller
    /// picked a column. Delegates to `list` with the id as a bound filter.
    pub async fn list_for_customer(
        &self,
        customer_id: &str,
        mut opts: OrderListOptions,
    ) -> Result<Paginated<Order>> {
        opts.sort = Some(opts.sort.unwrap_or(OrderSortColumn::ShippedDate));
        opts.customer_id = Some(customer_id.to_owned());
        self.list(opts).await
    }

    /// Get a single order with display names and computed subtotal.
    pub async fn get(&self, id: i64) -> Result<Option<OrderWithSubtotal>> {
        let order = sqlx::query_as::<_, OrderWithSubtotal>(GET_ORDER_SQL)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(order)
    }

    /// Get an order's line items in insertion order, each with its product
    /// name and derived line price.
    pub async fn details(&self, id: i64) -> Result<Vec<OrderDetail>> {
        let details = sqlx::query_as::<_, OrderDetail>(GET_DETAILS_SQL)
            .bind(id)
            .fetch_all(self.pool)
            .await?;
        Ok(details)
    }

    /// Get an order together with its line items.
    ///
    /// Both reads run on one REPEATABLE READ transaction so the pair is a
    /// consistent snapshot; a delete committing between the two queries
    /// can't yield a present order paired with missing line items. The
    /// default READ COMMITTED level would not give this (each statement
    /// takes its own snapshot there).
    pub async fn get_with_details(
        &self,
        id: i64,
    ) -> Result<(Option<OrderWithSubtotal>, Vec<OrderDetail>)> {
        let mut tx = self.pool.begin().await?;

        // Must be the first statement in the transaction.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let order = sqlx::query_as::<_, OrderWithSubtotal>(GET_ORDER_SQL)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let details = sqlx::query_as::<_, OrderDetail>(GET_DETAILS_SQL)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((order, details))
    }

    /// Create an order with its line items (atomic).
    ///
    /// Inserts the header, then one row per detail entry with the id
    /// synthesized from the generated order id and the entry's 1-based
    /// position. Any failure drops the transaction, which rolls everything
    /// back, and the original error propagates to the caller.
    pub async fn create(&self, order: NewOrder) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (
                customer_id, employee_id, ship_name, ship_city, ship_address,
                ship_region, ship_country, ship_postal_code, ship_via,
                shipped_date, required_date, freight
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(order.header.customer_id.as_deref())
        .bind(order.header.employee_id)
        .bind(order.header.ship_name.as_deref())
        .bind(order.header.ship_city.as_deref())
        .bind(order.header.ship_address.as_deref())
        .bind(order.header.ship_region.as_deref())
        .bind(order.header.ship_country.as_deref())
        .bind(order.header.ship_postal_code.as_deref())
        .bind(order.header.ship_via)
        .bind(order.header.shipped_date)
        .bind(order.header.required_date)
        .bind(order.header.freight)
        .fetch_optional(&mut *tx)
        .await?;

        let id: i64 = row
            .ok_or(DbError::MissingInsertId { table: "orders" })?
            .get("id");

        for (n, detail) in order.details.iter().enumerate() {
            insert_detail(&mut tx, id, detail_id(id, n + 1), detail).await?;
        }

        tx.commit().await?;
        tracing::debug!(id, details = order.details.len(), "created order");
        Ok(id)
    }

    /// Update an order header and a set of its line items (atomic).
    ///
    /// Every header field is overwritten with the supplied value; each detail
    /// patch updates the row matching its id, a no-op when nothing matches.
    /// The caller keeps ownership of the data it passed in, so nothing is
    /// re-read from storage.
    pub async fn update(
        &self,
        id: i64,
        header: &OrderFields,
        details: &[OrderDetailPatch],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = $1,
                employee_id = $2,
                ship_name = $3,
                ship_city = $4,
                ship_address = $5,
                ship_region = $6,
                ship_country = $7,
                ship_postal_code = $8,
                ship_via = $9,
                shipped_date = $10,
                required_date = $11,
                freight = $12
            WHERE id = $13
            "#,
        )
        .bind(header.customer_id.as_deref())
        .bind(header.employee_id)
        .bind(header.ship_name.as_deref())
        .bind(header.ship_city.as_deref())
        .bind(header.ship_address.as_deref())
        .bind(header.ship_region.as_deref())
        .bind(header.ship_country.as_deref())
        .bind(header.ship_postal_code.as_deref())
        .bind(header.ship_via)
        .bind(header.shipped_date)
        .bind(header.required_date)
        .bind(header.freight)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        for detail in details {
            sqlx::query(
                r#"
                UPDATE order_details SET
                    product_id = $1,
                    unit_price = $2,
                    quantity = $3,
                    discount = $4
                WHERE id = $5 AND order_id = $6
                "#,
            )
            .bind(detail.product_id)
            .bind(detail.unit_price)
            .bind(detail.quantity)
            .bind(detail.discount)
            .bind(&detail.id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(id, details = details.len(), "updated order");
        Ok(())
    }

    /// Delete an order and its line items (atomic).
    ///
    /// The cascade is explicit: line items go first, then the header, in one
    /// transaction. Returns the number of deleted header rows (0 when the
    /// order doesn't exist).
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_details WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(id, "deleted order");
        Ok(result.rows_affected())
    }
}

async fn insert_detail(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    order_id: i64,
    id: String,
    detail: &NewOrderDetail,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO order_details (id, order_id, product_id, unit_price, quantity, discount)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&id)
    .bind(order_id)
    .bind(detail.product_id)
    .bind(detail.unit_price)
    .bind(detail.quantity)
    .bind(detail.discount)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
