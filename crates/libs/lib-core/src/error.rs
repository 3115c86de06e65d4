//! # Centralized Error Handling
//!
//! Application-wide error type [`AppError`] used across all backend modules,
//! following the `thiserror` pattern.
//!
//! Errors map naturally to HTTP status codes:
//!
//! - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//! - [`Unauthorized`](AppError::Unauthorized) → 401 Unauthorized
//! - [`Forbidden`](AppError::Forbidden) → 403 Forbidden
//! - [`NotFound`](AppError::NotFound) → 404 Not Found
//! - [`Conflict`](AppError::Conflict) → 409 Conflict
//! - [`Config`](AppError::Config) / [`Internal`](AppError::Internal) → 500
//!
//! Internal error details are logged server-side and never leaked to the
//! client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to act on this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness or state conflict (duplicate username/email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-facing error message.
    ///
    /// For internal errors, returns a generic message instead of the
    /// underlying detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::Conflict(_) => "Conflict",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Full detail goes to the server logs only.
        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username or email already exists".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}
