use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use domain::Department;

use super::{parse_id, payload, AppState, IdResponse};
use crate::error::ApiError;
use crate::validation::validate_department;

/// Get-or-create: repeating the same body returns the same id, so this
/// answers 200 rather than 201.
pub async fn get_or_create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IdResponse>, ApiError> {
    let dept: Department = payload(&body)?;
    validate_department(&dept)?;

    let id = state.departments.get_or_create(&dept).await?;
    Ok(Json(IdResponse { id }))
}

pub async fn get(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Department>, ApiError> {
    let id = parse_id(&id, "department")?;
    let dept = state.departments.get_department(id).await?;
    Ok(Json(dept))
}
