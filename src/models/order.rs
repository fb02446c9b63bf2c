//! Input types for order writes and listing options

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pagination::Pagination;
use super::sort::{OrderSortColumn, SortDirection};

/// Order header fields as supplied by the caller.
///
/// Used verbatim for both create and update; updates overwrite every field
/// unconditionally (partial updates are not supported at this layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFields {
    pub customer_id: Option<String>,
    pub employee_id: Option<i64>,
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

/// A new order: header plus its line items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrder {
    pub header: OrderFields,
    pub details: Vec<NewOrderDetail>,
}

/// A line item to insert. Its id is synthesized by the repository as
/// `"<order_id>/<n>"`, n starting at 1 in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderDetail {
    pub product_id: i64,
    pub unit_price: f64,
    pub quantity: i32,
    /// Fractional discount in 0..=1
    pub discount: f64,
}

/// A line-item update, addressed by the detail's own id.
/// Updating an id that matches no row is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailPatch {
    pub id: String,
    pub product_id: i64,
    pub unit_price: f64,
    pub quantity: i32,
    pub discount: f64,
}

/// Options for the order listing.
///
/// `sort` is `None` for "caller didn't choose": the plain listing then sorts
/// by id, the customer-scoped listing by shipped_date.
#[derive(Debug, Clone, Default)]
pub struct OrderListOptions {
    pub page: Pagination,
    pub sort: Option<OrderSortColumn>,
    pub direction: SortDirection,
    pub customer_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_defaults() {
        let opts = OrderListOptions::default();
        assert_eq!(opts.page.page, 1);
        assert_eq!(opts.page.per_page, 20);
        assert_eq!(opts.sort, None);
        assert_eq!(opts.direction, SortDirection::Asc);
        assert_eq!(opts.customer_id, None);
    }
}
