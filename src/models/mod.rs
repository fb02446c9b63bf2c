//! Option and value types consumed by the repositories

pub mod order;
pub mod pagination;
pub mod sort;

pub use order::{NewOrder, NewOrderDetail, OrderDetailPatch, OrderFields, OrderListOptions};
pub use pagination::{Paginated, Pagination};
pub use sort::{OrderSortColumn, SortDirection};
