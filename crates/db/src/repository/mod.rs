//! Postgres implementations of the `domain` repository traits.
//!
//! Each repository holds a clone of the shared pool. No business logic,
//! pure SQL plus error translation.

pub mod departments;
pub mod employees;

pub use departments::PgDepartmentRepository;
pub use employees::PgEmployeeRepository;
