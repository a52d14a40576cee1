//! `domain` crate: plain records, the error taxonomy, and the repository
//! contracts every persistence backend must fulfil.
//!
//! Both the `service` crate and the `db` crate depend on this one, so the
//! repository traits live here rather than next to their Postgres
//! implementations.

pub mod error;
pub mod models;
pub mod repository;
pub mod mock;

pub use error::{DomainError, DomainResult};
pub use models::{Department, Employee};
pub use repository::{DepartmentRepository, EmployeeRepository};
