pub mod auth;
pub mod departments;
pub mod health;
pub mod records;
pub mod users;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::common::RecordError;

/// Maps domain errors onto HTTP responses with a JSON error body.
pub struct ApiError(pub RecordError);

impl From<RecordError> for ApiError {
    fn from(e: RecordError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RecordError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            RecordError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            RecordError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            RecordError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            RecordError::Database(e) => {
                error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor.".to_string(),
                )
            }
            RecordError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor.".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
