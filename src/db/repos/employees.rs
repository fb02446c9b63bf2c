//! Employee repository
//!
//! Listing with an aggregated order count, and single fetch by id. The
//! listing's join is caller-chosen: inner join hides employees with zero
//! orders, left join includes them with a count of 0.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::config::{DataConfig, EmployeeScope};
use crate::error::Result;

/// Employee record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub region: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub reports_to: Option<i64>,
}

/// Employee with order count for list display
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeWithOrderCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub employee: Employee,
    pub order_count: i64,
}

/// Employee repository
pub struct EmployeeRepo<'a> {
    pool: &'a PgPool,
    default_scope: EmployeeScope,
}

impl<'a> EmployeeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            default_scope: EmployeeScope::default(),
        }
    }

    /// Repository whose listing default comes from the loaded config
    /// (`employee_listing`).
    pub fn from_config(pool: &'a PgPool, config: &DataConfig) -> Self {
        Self {
            pool,
            default_scope: config.employee_listing,
        }
    }

    /// List employees with their order counts in a single query.
    ///
    /// `None` falls back to the repository's default scope.
    pub async fn list(
        &self,
        scope: Option<EmployeeScope>,
    ) -> Result<Vec<EmployeeWithOrderCount>> {
        let scope = scope.unwrap_or(self.default_scope);
        // Fixed fragment chosen by enum, not caller text.
        let join = match scope {
            EmployeeScope::WithOrders => "JOIN",
            EmployeeScope::All => "LEFT JOIN",
        };
        let query = format!(
            r#"
            SELECT
                e.id,
                e.first_name,
                e.last_name,
                e.title,
                e.region,
                e.hire_date,
                e.reports_to,
                COUNT(o.id) AS order_count
            FROM employees e
            {join} orders o ON o.employee_id = e.id
            GROUP BY e.id, e.first_name, e.last_name, e.title, e.region,
                     e.hire_date, e.reports_to
            ORDER BY e.id
            "#,
        );

        let employees = sqlx::query_as::<_, EmployeeWithOrderCount>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(employees)
    }

    /// Get a single employee by id.
    pub async fn get(&self, id: i64) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, title, region, hire_date, reports_to
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(employee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool_with_options;
    use crate::schema;
    use sqlx::Row;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -- --ignored

    async fn test_pool() -> PgPool {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 5)
            .await
            .expect("pool creation failed");
        schema::ensure(&pool).await.expect("schema setup failed");
        pool
    }

    async fn seed_employee(pool: &PgPool, first: &str, last: &str) -> i64 {
        sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, title)
            VALUES ($1, $2, 'Sales Representative')
            RETURNING id
            "#,
        )
        .bind(first)
        .bind(last)
        .fetch_one(pool)
        .await
        .expect("employee insert failed")
        .get("id")
    }

    async fn seed_order_for(pool: &PgPool, employee_id: i64) {
        sqlx::query("INSERT INTO orders (employee_id) VALUES ($1)")
            .bind(employee_id)
            .execute(pool)
            .await
            .expect("order insert failed");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn scope_controls_zero_order_visibility() {
        let pool = test_pool().await;
        let repo = EmployeeRepo::new(&pool);

        let idle = seed_employee(&pool, "Nancy", "Davolio").await;
        let busy = seed_employee(&pool, "Andrew", "Fuller").await;
        seed_order_for(&pool, busy).await;
        seed_order_for(&pool, busy).await;

        let active = repo
            .list(Some(EmployeeScope::WithOrders))
            .await
            .expect("list failed");
        assert!(active.iter().all(|e| e.employee.id != idle));
        let busy_row = active
            .iter()
            .find(|e| e.employee.id == busy)
            .expect("busy employee missing");
        assert_eq!(busy_row.order_count, 2);

        let everyone = repo
            .list(Some(EmployeeScope::All))
            .await
            .expect("list failed");
        let idle_row = everyone
            .iter()
            .find(|e| e.employee.id == idle)
            .expect("idle employee missing");
        assert_eq!(idle_row.order_count, 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn config_supplies_listing_default() {
        let pool = test_pool().await;
        let idle = seed_employee(&pool, "Margaret", "Peacock").await;

        // Plain repo defaults to the inner join, hiding the idle employee.
        let repo = EmployeeRepo::new(&pool);
        let listed = repo.list(None).await.expect("list failed");
        assert!(listed.iter().all(|e| e.employee.id != idle));

        // Config-built repo picks up employee_listing = "all".
        let config = DataConfig {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL required"),
            max_connections: 5,
            employee_listing: EmployeeScope::All,
        };
        let repo = EmployeeRepo::from_config(&pool, &config);
        let listed = repo.list(None).await.expect("list failed");
        assert!(listed.iter().any(|e| e.employee.id == idle));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn get_by_id() {
        let pool = test_pool().await;
        let repo = EmployeeRepo::new(&pool);

        let id = seed_employee(&pool, "Janet", "Leverling").await;
        let employee = repo
            .get(id)
            .await
            .expect("get failed")
            .expect("employee absent");
        assert_eq!(employee.first_name, "Janet");
        assert_eq!(employee.last_name, "Leverling");
        assert_eq!(employee.reports_to, None);

        assert!(repo.get(-1).await.expect("get failed").is_none());
    }
}
