//! Axum handlers, one module per resource.

pub mod departments;
pub mod employees;
pub mod health;

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub use crate::state::AppState;
use crate::error::ApiError;

/// `{"id": n}` body returned by create endpoints.
#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i32,
}

/// `{"message": "..."}` body returned by update/delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Parse a path segment as an id, reporting `Invalid <what> ID` on failure.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<i32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {what} ID")))
}

/// Decode a JSON body regardless of its `Content-Type`, collapsing every
/// decode failure into one message.
pub(crate) fn payload<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(%err, "rejected request body");
        ApiError::BadRequest("Invalid request payload".into())
    })
}
