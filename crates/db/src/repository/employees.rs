//! Employee CRUD operations.

use async_trait::async_trait;
use domain::error::{EMPLOYEE_NOT_FOUND, NO_FIELDS_TO_UPDATE};
use domain::{DomainError, DomainResult, Employee, EmployeeRepository};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::map_write_error;
use crate::models::{EmployeeRow, EMPLOYEE_COLUMNS};

#[derive(Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_list(
        &self,
        sql: &str,
        binds: &[i32],
    ) -> DomainResult<Vec<Employee>> {
        let mut query = sqlx::query_as::<_, EmployeeRow>(sql);
        for value in binds {
            query = query.bind(*value);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("failed to get employees: {e}")))?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}

/// Build `UPDATE employees SET … WHERE id = $n` from the non-empty fields
/// of `emp`. Returns `None` when there is nothing to assign.
pub(crate) fn build_update(emp: &Employee) -> Option<QueryBuilder<'static, Postgres>> {
    if !emp.has_updates() {
        return None;
    }

    let mut qb = QueryBuilder::new("UPDATE employees SET ");
    let mut set = qb.separated(", ");

    if !emp.name.is_empty() {
        set.push("name = ").push_bind_unseparated(emp.name.clone());
    }
    if !emp.surname.is_empty() {
        set.push("surname = ").push_bind_unseparated(emp.surname.clone());
    }
    if !emp.phone.is_empty() {
        set.push("phone = ").push_bind_unseparated(emp.phone.clone());
    }
    if emp.company_id != 0 {
        set.push("company_id = ").push_bind_unseparated(emp.company_id);
    }
    if let Some(department_id) = emp.department_id {
        set.push("department_id = ").push_bind_unseparated(department_id);
    }
    if !emp.passport_type.is_empty() {
        set.push("passport_type = ").push_bind_unseparated(emp.passport_type.clone());
    }
    if !emp.passport_number.is_empty() {
        set.push("passport_number = ").push_bind_unseparated(emp.passport_number.clone());
    }

    qb.push(" WHERE id = ").push_bind(emp.id);
    Some(qb)
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, emp: &Employee) -> DomainResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO employees
                (name, surname, phone, company_id, department_id, passport_type, passport_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&emp.name)
        .bind(&emp.surname)
        .bind(&emp.phone)
        .bind(emp.company_id)
        .bind(emp.department_id)
        .bind(&emp.passport_type)
        .bind(&emp.passport_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to create employee"))?;

        debug!(employee_id = id, "employee inserted");
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> DomainResult<Employee> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, EmployeeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("failed to get employee: {e}")))?
            .map(Employee::from)
            .ok_or_else(|| DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()))
    }

    async fn update(&self, emp: &Employee) -> DomainResult<()> {
        let mut qb = build_update(emp)
            .ok_or_else(|| DomainError::Validation(NO_FIELDS_TO_UPDATE.into()))?;
        debug!(employee_id = emp.id, sql = qb.sql(), "updating employee");

        let result = qb
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "failed to update employee"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal(format!("failed to delete employee: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(EMPLOYEE_NOT_FOUND.into()));
        }
        Ok(())
    }

    async fn get_by_company(&self, company_id: i32) -> DomainResult<Vec<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE company_id = $1 ORDER BY id");
        let employees = self.fetch_list(&sql, &[company_id]).await?;

        if employees.is_empty() {
            return Err(DomainError::employees_not_found_for_company(company_id));
        }
        Ok(employees)
    }

    async fn get_by_department(
        &self,
        company_id: i32,
        department_id: i32,
    ) -> DomainResult<Vec<Employee>> {
        let sql = r#"
            SELECT e.id, e.name, e.surname, e.phone, e.company_id,
                   e.department_id, e.passport_type, e.passport_number
            FROM employees e
            JOIN departments d ON e.department_id = d.id
            WHERE e.company_id = $1 AND d.id = $2
            ORDER BY e.id
        "#;
        let employees = self.fetch_list(sql, &[company_id, department_id]).await?;

        if employees.is_empty() {
            return Err(DomainError::employees_not_found_for_department(
                company_id,
                department_id,
            ));
        }
        Ok(employees)
    }
}
