use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::Employee;

use super::{parse_id, payload, AppState, IdResponse, MessageResponse};
use crate::error::ApiError;
use crate::validation::{validate_employee_update, validate_new_employee};

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let emp: Employee = payload(&body)?;
    validate_new_employee(&emp)?;

    let id = state.employees.create_employee(emp).await?;
    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Employee>, ApiError> {
    let id = parse_id(&id, "employee")?;
    let emp = state.employees.get_employee(id).await?;
    Ok(Json(emp))
}

pub async fn update(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "employee")?;
    let mut emp: Employee = payload(&body)?;
    validate_employee_update(&emp)?;
    // The path wins over any id in the body.
    emp.id = id;

    state.employees.update_employee(emp).await?;
    Ok(Json(MessageResponse {
        message: "Employee updated successfully",
    }))
}

pub async fn delete(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id, "employee")?;
    state.employees.delete_employee(id).await?;
    Ok(Json(MessageResponse {
        message: "Employee deleted successfully",
    }))
}

pub async fn list_by_company(
    Path(company_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let company_id = parse_id(&company_id, "company")?;
    let employees = state.employees.get_company_employees(company_id).await?;
    Ok(Json(employees))
}

pub async fn list_by_department(
    Path((company_id, department_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let company_id = parse_id(&company_id, "company")?;
    let department_id = parse_id(&department_id, "department")?;
    let employees = state
        .employees
        .get_department_employees(company_id, department_id)
        .await?;
    Ok(Json(employees))
}
