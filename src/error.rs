use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::validation::{FieldErrors, attendance::unknown_employee_message};

/// Errors a handler can end with. Every variant renders its own JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // constraint violations caught by the store look the same as the pre-insert checks
        match err {
            StoreError::Conflict(key) => ApiError::Validation(FieldErrors::from_conflict(key)),
            StoreError::UnknownEmployee(id) => {
                ApiError::Validation(FieldErrors::single("employee", unknown_employee_message(id)))
            }
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(errors) => HttpResponse::BadRequest().json(errors),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "error": msg })),
            ApiError::Store(e) => {
                error!(error = %e, "Store operation failed");
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal Server Error"
                }))
            }
        }
    }
}
