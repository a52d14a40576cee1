//! `service` crate: business orchestration over the repository traits.
//!
//! Services never talk SQL. They resolve embedded departments before writes,
//! hydrate departments on reads, and wrap every repository error with the
//! operation that failed.

pub mod department;
pub mod employee;

pub use department::DepartmentService;
pub use employee::EmployeeService;
