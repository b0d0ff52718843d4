//! REST API types and error-to-status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{CheckinError, ExportError, PurgeError, ServerError};

// =============================================================================
// Requests / Responses
// =============================================================================

/// Successful check-in: the store-assigned record id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub id: String,
}

/// Admin gate login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub passphrase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub granted: bool,
}

/// Purge request; `confirm` must be the literal "DELETE" (any case).
#[derive(Debug, Clone, Deserialize)]
pub struct PurgeRequest {
    pub confirm: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeResponse {
    pub deleted: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EncouragementRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncouragementResponse {
    pub text: String,
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({ "error": error })
}

// =============================================================================
// Error -> Status mapping
// =============================================================================

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // Inline, per-field; the caller re-renders every message at once
            ServerError::Checkin(CheckinError::Invalid(fields)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Validation failed", "fields": fields }),
            ),
            ServerError::Checkin(
                conflict @ (CheckinError::DuplicateEmail | CheckinError::DuplicatePhone),
            ) => (StatusCode::CONFLICT, error_response(&conflict.to_string())),
            ServerError::Checkin(CheckinError::Store(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response(&e.to_string()),
            ),
            // Refused, not an empty file
            ServerError::Export(ExportError::NoMatchingRecords) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                error_response("No data to export"),
            ),
            ServerError::Export(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response(&e.to_string()),
            ),
            ServerError::Purge(PurgeError::NotConfirmed) => {
                (StatusCode::FORBIDDEN, error_response("Purge not confirmed"))
            }
            ServerError::Purge(PurgeError::AlreadyRunning) => (
                StatusCode::CONFLICT,
                error_response("A purge is already in progress"),
            ),
            ServerError::Purge(e @ PurgeError::BatchFailed { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response(&e.to_string()),
            ),
            ServerError::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_response(&e.to_string()),
            ),
            ServerError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, error_response(message))
            }
        };

        (status, Json(body)).into_response()
    }
}
