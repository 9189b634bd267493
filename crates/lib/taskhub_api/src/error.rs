//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Conflict(m) => (StatusCode::CONFLICT, "conflict", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Internal(m) => {
                // Operator-visible only; the response body stays generic.
                error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<taskhub_core::auth::AuthError> for AppError {
    fn from(e: taskhub_core::auth::AuthError) -> Self {
        match e {
            taskhub_core::auth::AuthError::CredentialError => {
                AppError::Unauthorized("Invalid username or password".into())
            }
            taskhub_core::auth::AuthError::TokenError(msg) => AppError::Unauthorized(msg),
            taskhub_core::auth::AuthError::ValidationError(msg) => AppError::Validation(msg),
            taskhub_core::auth::AuthError::Duplicate(msg) => AppError::Conflict(msg),
            taskhub_core::auth::AuthError::DbError(e) => AppError::from(e),
            taskhub_core::auth::AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<taskhub_core::tasks::TaskError> for AppError {
    fn from(e: taskhub_core::tasks::TaskError) -> Self {
        match e {
            taskhub_core::tasks::TaskError::NotFound => AppError::NotFound("Task not found".into()),
            taskhub_core::tasks::TaskError::Validation(msg) => AppError::Validation(msg),
            taskhub_core::tasks::TaskError::DbError(e) => AppError::from(e),
        }
    }
}
