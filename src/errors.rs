//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("You must be authenticated to access this resource")]
    AuthenticationRequired,

    #[error("Invalid or missing authentication token")]
    InvalidOrExpiredToken,

    #[error("Your user account doesn't have the necessary permissions to access this resource")]
    NotPermitted,

    #[error("Invalid authentication credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("The requested resource could not be found")]
    RecordNotFound,

    #[error("Unable to update the record due to an edit conflict, please try again")]
    EditConflict,

    #[error("{0} already exists")]
    DuplicateConstraint(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            AppError::InvalidOrExpiredToken => "INVALID_TOKEN",
            AppError::NotPermitted => "NOT_PERMITTED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::RecordNotFound => "NOT_FOUND",
            AppError::EditConflict => "EDIT_CONFLICT",
            AppError::DuplicateConstraint(_) => "DUPLICATE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationRequired
            | AppError::InvalidOrExpiredToken
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotPermitted => StatusCode::FORBIDDEN,
            AppError::RecordNotFound => StatusCode::NOT_FOUND,
            AppError::EditConflict | AppError::DuplicateConstraint(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            // Store details are logged, never returned
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "The server encountered a problem and could not process your request".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                "The server encountered a problem and could not process your request".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// True for failures that originate in the store or the runtime rather than the caller.
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Internal(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let challenge = matches!(self, AppError::InvalidOrExpiredToken);
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::RecordNotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn duplicate(entity: impl Into<String>) -> Self {
        AppError::DuplicateConstraint(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Classify a failed insert/update.
    ///
    /// Unique violations become `DuplicateConstraint` naming `entity`, foreign-key
    /// violations become a validation error. Constraint names never reach the client.
    pub fn from_write(err: DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(%detail, "Unique constraint violated");
                AppError::duplicate(entity)
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!(%detail, "Foreign key constraint violated");
                AppError::validation("Referenced record does not exist")
            }
            _ => AppError::Database(err),
        }
    }
}
