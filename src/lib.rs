//! northwind-data: data-access layer for a Northwind-style order schema.
//!
//! Exposes repositories for orders (paginated listing, single fetch with
//! computed subtotal, transactional create/update/delete of an order and its
//! line items) and employees (listing with order counts, single fetch).
//! Consumers call the repositories directly with plain option/data structs
//! and get plain record structs back; there is no HTTP or CLI tier here.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;

pub use config::{DataConfig, EmployeeScope};
pub use db::pool::{create_pool, create_pool_with_options};
pub use db::repos::{
    Employee, EmployeeRepo, EmployeeWithOrderCount, Order, OrderDetail, OrderRepo,
    OrderWithSubtotal,
};
pub use error::{DbError, Result};
pub use models::{
    NewOrder, NewOrderDetail, OrderDetailPatch, OrderFields, OrderListOptions, OrderSortColumn,
    Paginated, Pagination, SortDirection,
};
