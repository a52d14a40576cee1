//! Department lookups and get-or-create.

use async_trait::async_trait;
use domain::error::DEPARTMENT_NOT_FOUND;
use domain::{Department, DepartmentRepository, DomainError, DomainResult};
use sqlx::PgPool;
use tracing::debug;

use crate::error::map_write_error;
use crate::models::DepartmentRow;

#[derive(Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    /// Look up by `(company_id, name)`; insert only when absent.
    ///
    /// Two concurrent creators of the same department race on the unique
    /// constraint; the loser sees `AlreadyExists`.
    async fn get_or_create(&self, dept: &Department) -> DomainResult<i32> {
        let existing: Option<i32> =
            sqlx::query_scalar("SELECT id FROM departments WHERE company_id = $1 AND name = $2")
                .bind(dept.company_id)
                .bind(&dept.name)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Internal(format!("failed to query department: {e}")))?;

        if let Some(id) = existing {
            debug!(department_id = id, "department already exists");
            return Ok(id);
        }

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO departments (company_id, name, phone) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(dept.company_id)
        .bind(&dept.name)
        .bind(&dept.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to create department"))?;

        debug!(department_id = id, "department inserted");
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> DomainResult<Department> {
        sqlx::query_as::<_, DepartmentRow>(
            "SELECT id, company_id, name, phone FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Internal(format!("failed to get department: {e}")))?
        .map(Department::from)
        .ok_or_else(|| DomainError::NotFound(DEPARTMENT_NOT_FOUND.into()))
    }
}
