//! Unified error handling for the admin panel.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::storage::StorageError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Object storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Email send failed for a primary operation.
    #[error("Email error: {0}")]
    Email(#[from] crate::services::email::EmailError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Admin is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Admin lacks the role for this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Duplicate resource.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Storage(_) | Self::Email(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_))
            | Self::Auth(AuthError::AdminAlreadyExists | AuthError::AlreadyProvisioned)
            | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_)
            | Self::Auth(AuthError::PasswordHash | AuthError::Repository(_))
            | Self::Storage(_)
            | Self::Email(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Auth(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => format!("Conflict: {msg}"),
            Self::Database(_)
            | Self::Auth(AuthError::PasswordHash | AuthError::Repository(_))
            | Self::Storage(_)
            | Self::Email(_)
            | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("x".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Conflict("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_repository_not_found_maps_to_404() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }
}
