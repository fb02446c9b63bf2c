//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - JOINs for list operations (no N+1)
//! - Values always bound as parameters; ORDER BY fragments from enums only
//! - Transactions for multi-statement writes, rollback-then-rethrow on error

pub mod employees;
pub mod orders;

pub use employees::{Employee, EmployeeRepo, EmployeeWithOrderCount};
pub use orders::{Order, OrderDetail, OrderRepo, OrderWithSubtotal};
