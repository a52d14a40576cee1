//! `db` crate: pure persistence layer.
//!
//! Provides a connection pool, typed row structs, and Postgres
//! implementations of the `domain` repository traits. No business logic
//! lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::{DbPool, DbSettings};
pub use error::DbError;
pub use repository::{PgDepartmentRepository, PgEmployeeRepository};
