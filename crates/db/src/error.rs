//! Typed error type for the db crate, and translation of failed writes into
//! domain errors.

use domain::error::{
    DEPARTMENT_NAME_TAKEN, DEPARTMENT_PHONE_TAKEN, EMPLOYEE_PASSPORT_TAKEN, EMPLOYEE_PHONE_TAKEN,
};
use domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Domain message for a violated unique constraint, if it is one we know.
pub fn conflict_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "employees_phone_key" => Some(EMPLOYEE_PHONE_TAKEN),
        "employees_passport_number_key" => Some(EMPLOYEE_PASSPORT_TAKEN),
        "departments_company_id_name_key" => Some(DEPARTMENT_NAME_TAKEN),
        "departments_phone_key" => Some(DEPARTMENT_PHONE_TAKEN),
        _ => None,
    }
}

/// Translate a failed write into a domain error.
///
/// Known unique constraints become `AlreadyExists`; anything else becomes
/// `Internal` prefixed with `action` (e.g. "failed to create employee").
pub fn map_write_error(err: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(message) = db_err.constraint().and_then(conflict_message) {
            return DomainError::AlreadyExists(message.to_string());
        }
        if db_err.is_unique_violation() {
            return DomainError::AlreadyExists(format!("{action}: {}", db_err.message()));
        }
    }
    DomainError::Internal(format!("{action}: {err}"))
}
