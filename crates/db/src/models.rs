//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models. Domain types live in the `domain` crate;
//! each row converts into its domain record.

use domain::{Department, Employee};
use sqlx::FromRow;

/// Column list shared by every employee SELECT.
pub(crate) const EMPLOYEE_COLUMNS: &str =
    "id, name, surname, phone, company_id, department_id, passport_type, passport_number";

// ---------------------------------------------------------------------------
// departments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct DepartmentRow {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub phone: String,
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: row.id,
            company_id: row.company_id,
            name: row.name,
            phone: row.phone,
        }
    }
}

// ---------------------------------------------------------------------------
// employees
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub company_id: i32,
    /// Weak reference; `NULL` when the employee has no department.
    pub department_id: Option<i32>,
    pub passport_type: String,
    pub passport_number: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            company_id: row.company_id,
            department_id: row.department_id,
            passport_type: row.passport_type,
            passport_number: row.passport_number,
            department: None,
        }
    }
}
