use crate::db::models::api::{ApiResponse, error_codes};
use crate::workflow::WorkflowError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Authentication error: {message}")]
    Auth { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Precondition failed: {message}")]
    PreconditionFailed { message: String },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
        code: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Denied(message) => AppError::Forbidden { message },
            WorkflowError::NotFound { resource, id } => AppError::NotFound {
                resource: format!("{} {}", resource, id),
            },
            WorkflowError::Precondition(message) => AppError::PreconditionFailed { message },
        }
    }
}

impl AppError {
    /// Status code and envelope for this error. Server-side failures are
    /// logged here and their details kept out of the response.
    fn status_and_body(&self) -> (StatusCode, ApiResponse<()>) {
        match self {
            AppError::Database(e) => {
                tracing::error!(code = error_codes::SYSTEM_DATABASE_ERROR, "Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Database error"),
                )
            }
            AppError::Pool(e) => {
                tracing::error!(code = error_codes::SYSTEM_DATABASE_ERROR, "Connection pool error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Connection error"),
                )
            }
            AppError::Redis(e) => {
                tracing::error!(code = error_codes::SYSTEM_CACHE_ERROR, "Redis error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Cache error"),
                )
            }
            AppError::Auth { message } => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::<()>::unauthorized(message),
            ),
            AppError::Forbidden { message } => {
                (StatusCode::FORBIDDEN, ApiResponse::<()>::forbidden(message))
            }
            AppError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::bad_request(message),
            ),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                ApiResponse::<()>::not_found(&format!("{} not found", resource)),
            ),
            AppError::PreconditionFailed { message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::<()>::precondition_failed(message),
            ),
            AppError::Conflict {
                message,
                field,
                code,
            } => (
                StatusCode::CONFLICT,
                ApiResponse::<()>::conflict(message, field.clone(), code.as_deref().unwrap_or("")),
            ),
            AppError::Config(e) => {
                tracing::error!("Configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Configuration error"),
                )
            }
            AppError::Jwt(e) => {
                tracing::warn!("JWT error: {}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    ApiResponse::<()>::unauthorized("Invalid token"),
                )
            }
            AppError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error("Password processing error"),
                )
            }
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::internal_error(message),
                )
            }
        }
    }

    /// Plain-text rendering used for partial-refresh requests.
    pub fn into_plain_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, body.message).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, response) = self.status_and_body();
        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// 便捷的错误创建函数
impl AppError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict_with_code(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            message: message.into(),
            field,
            code: Some(code.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_errors_map_to_http_statuses() {
        let cases = [
            (
                WorkflowError::Denied("You are not assigned to this project.".to_string()),
                StatusCode::FORBIDDEN,
            ),
            (
                WorkflowError::NotFound {
                    resource: "Report",
                    id: 4,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                WorkflowError::Precondition("Project is Created but must be Plan Pending.".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn precondition_envelope_carries_machine_code() {
        let err = AppError::from(WorkflowError::Precondition("nope".to_string()));
        let (_, body) = err.status_and_body();
        assert_eq!(body.code, 422);
        let errors = body.errors.unwrap();
        assert_eq!(errors[0].code, "PRECONDITION_FAILED");
    }

    #[test]
    fn not_found_names_the_record() {
        let err = AppError::from(WorkflowError::NotFound {
            resource: "Plan",
            id: 12,
        });
        let (_, body) = err.status_and_body();
        assert_eq!(body.message, "Plan 12 not found");
    }
}
