//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - List operations use JOINs and a window-function total - no N+1 queries
//! - Transactions for every multi-statement write
//! - Sort fragments come from allow-list enums, values are always bound

pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
