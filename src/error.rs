use crate::authz::Denial;
use crate::db::models::api::{ApiResponse, error_codes};
use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Access denied: {0}")]
    Denied(#[from] Denial),

    #[error("Duplicate membership in workspace {workspace_id}")]
    DuplicateMembership { workspace_id: uuid::Uuid },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
        code: Option<String>,
    },

    #[error("Data integrity violation: {0}")]
    Integrity(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status the error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated { .. } | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Denied(Denial::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Denied(_) => StatusCode::FORBIDDEN,
            AppError::DuplicateMembership { .. } | AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Integrity(_)
            | AppError::Config(_)
            | AppError::Bcrypt(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable reason string carried in every error payload.
    pub fn code(&self) -> &str {
        match self {
            AppError::Unauthenticated { .. } | AppError::Jwt(_) => error_codes::UNAUTHENTICATED,
            AppError::Denied(denial) => denial.reason(),
            AppError::DuplicateMembership { .. } => error_codes::DUPLICATE_MEMBERSHIP,
            AppError::Validation { .. } => error_codes::VALIDATION_ERROR,
            AppError::Conflict { code, .. } => code.as_deref().unwrap_or(error_codes::CONFLICT),
            _ => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let code = self.code().to_string();

        let response = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                ApiResponse::<()>::internal_error("Database error")
            }
            AppError::Pool(ref e) => {
                tracing::error!("Connection pool error: {}", e);
                ApiResponse::<()>::internal_error("Connection error")
            }
            AppError::Integrity(ref e) => {
                tracing::error!("Data integrity violation: {}", e);
                ApiResponse::<()>::internal_error("Data integrity error")
            }
            AppError::Config(ref e) => {
                tracing::error!("Configuration error: {}", e);
                ApiResponse::<()>::internal_error("Configuration error")
            }
            AppError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {}", e);
                ApiResponse::<()>::internal_error("Password processing error")
            }
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ApiResponse::<()>::internal_error("Internal server error")
            }
            AppError::Jwt(ref e) => {
                tracing::debug!("JWT error: {}", e);
                ApiResponse::<()>::unauthorized("Invalid token")
            }
            AppError::Unauthenticated { ref message } => ApiResponse::<()>::unauthorized(message),
            AppError::Denied(ref denial) => match denial {
                Denial::NotFound(_) => ApiResponse::<()>::not_found(&denial.to_string()),
                _ => ApiResponse::<()>::forbidden(&denial.to_string(), &code),
            },
            AppError::DuplicateMembership { .. } => ApiResponse::<()>::conflict(
                "Membership already exists for this workspace",
                Some("email".to_string()),
                &code,
            ),
            AppError::Validation {
                ref message,
                ref field,
            } => ApiResponse::<()>::bad_request(message, field.clone()),
            AppError::Conflict {
                ref message,
                ref field,
                ..
            } => ApiResponse::<()>::conflict(message, field.clone(), &code),
        };

        (status, Json(response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

// 便捷的错误创建函数
impl AppError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
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

    /// True when the error is a unique-constraint violation reported by Postgres.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            AppError::Database(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}
