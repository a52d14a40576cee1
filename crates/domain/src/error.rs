//! Domain-level error taxonomy.

use thiserror::Error;

/// Errors surfaced by repositories and services.
///
/// The variant carries the category; the message carries the context
/// accumulated at each layer boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// The requested record (or filtered set of records) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    AlreadyExists(String),

    /// Storage or infrastructure failure.
    #[error("{0}")]
    Internal(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

// Messages shared by every repository implementation.
pub const EMPLOYEE_NOT_FOUND: &str = "employee not found";
pub const DEPARTMENT_NOT_FOUND: &str = "department not found";
pub const EMPLOYEE_PHONE_TAKEN: &str = "employee with this phone number already exists";
pub const EMPLOYEE_PASSPORT_TAKEN: &str = "employee with this passport number already exists";
pub const DEPARTMENT_NAME_TAKEN: &str = "department with this name already exists in this company";
pub const DEPARTMENT_PHONE_TAKEN: &str = "department with this phone number already exists";
pub const NO_FIELDS_TO_UPDATE: &str = "no fields to update";

impl DomainError {
    pub fn employees_not_found_for_company(company_id: i32) -> Self {
        Self::NotFound(format!("employees not found for company id {company_id}"))
    }

    pub fn employees_not_found_for_department(company_id: i32, department_id: i32) -> Self {
        Self::NotFound(format!(
            "employees not found for company id {company_id} and department id {department_id}"
        ))
    }
}

impl DomainError {
    /// Prefix the message with `context`, keeping the category.
    ///
    /// `NotFound("employee not found").context("failed to get employee")`
    /// renders as `failed to get employee: employee not found`.
    pub fn context(self, context: &str) -> Self {
        match self {
            Self::Validation(m) => Self::Validation(format!("{context}: {m}")),
            Self::NotFound(m) => Self::NotFound(format!("{context}: {m}")),
            Self::AlreadyExists(m) => Self::AlreadyExists(format!("{context}: {m}")),
            Self::Internal(m) => Self::Internal(format!("{context}: {m}")),
        }
    }
}
