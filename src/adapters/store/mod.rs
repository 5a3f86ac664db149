//! UserStore adapters.
//!
//! - `InMemoryUserStore` - process-local tables
//! - `PostgresUserStore` - sqlx over PostgreSQL

mod in_memory;
mod postgres;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;
