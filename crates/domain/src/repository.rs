//! Repository contracts.
//!
//! Implemented by the Postgres repositories in the `db` crate and by the
//! in-memory doubles in [`crate::mock`].

use async_trait::async_trait;

use crate::{Department, DomainResult, Employee};

/// Persistence operations for departments.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Look up a department by `(company_id, name)`, inserting it when absent.
    /// Returns the id of the existing or newly created row.
    async fn get_or_create(&self, dept: &Department) -> DomainResult<i32>;

    /// Fetch a department by primary key.
    async fn get_by_id(&self, id: i32) -> DomainResult<Department>;
}

/// Persistence operations for employees.
///
/// Only `department_id` is stored; the embedded `department` is ignored on
/// writes and left `None` on reads.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, emp: &Employee) -> DomainResult<i32>;

    async fn get_by_id(&self, id: i32) -> DomainResult<Employee>;

    /// Overwrite only the non-empty fields of `emp` on the row `emp.id`.
    async fn update(&self, emp: &Employee) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// All employees of a company. An empty result is `NotFound`.
    async fn get_by_company(&self, company_id: i32) -> DomainResult<Vec<Employee>>;

    /// All employees of a company's department. An empty result is `NotFound`.
    async fn get_by_department(
        &self,
        company_id: i32,
        department_id: i32,
    ) -> DomainResult<Vec<Employee>>;
}
