//! Required-field checks applied to request bodies before they reach the
//! service layer.

use domain::{Department, Employee};

use crate::error::ApiError;

fn require(ok: bool, message: &str) -> Result<(), ApiError> {
    if ok {
        Ok(())
    } else {
        Err(ApiError::BadRequest(message.to_string()))
    }
}

pub fn validate_department(dept: &Department) -> Result<(), ApiError> {
    require(dept.company_id != 0, "department companyId is required")?;
    require(!dept.name.is_empty(), "department name is required")?;
    require(!dept.phone.is_empty(), "department phone is required")
}

/// Full validation for a new employee, including an embedded department.
pub fn validate_new_employee(emp: &Employee) -> Result<(), ApiError> {
    require(!emp.name.is_empty(), "employee name is required")?;
    require(!emp.surname.is_empty(), "employee surname is required")?;
    require(!emp.phone.is_empty(), "employee phone is required")?;
    require(emp.company_id != 0, "employee companyId is required")?;
    require(!emp.passport_number.is_empty(), "employee passport number is required")?;
    if let Some(dept) = &emp.department {
        validate_department(dept)?;
    }
    Ok(())
}

/// Partial updates accept any subset of fields, but an embedded department
/// must still be complete enough to get-or-create.
pub fn validate_employee_update(emp: &Employee) -> Result<(), ApiError> {
    if let Some(dept) = &emp.department {
        validate_department(dept)?;
    }
    Ok(())
}
