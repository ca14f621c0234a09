//! Unified error handling for the wholesale portal.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::jwt::JwtError;

/// Application-level error type for the wholesale portal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Bearer token problem.
    #[error("Token error: {0}")]
    Jwt(#[from] JwtError),

    /// Resource not found (or belongs to another company).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Role does not permit this action.
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
            Self::Database(_) | Self::Internal(_) | Self::Jwt(JwtError::Sign(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Wholesale request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) | Self::Conflict(_) => {
                StatusCode::CONFLICT
            }
            Self::Database(_) | Self::Internal(_) | Self::Jwt(JwtError::Sign(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(AuthError::InvalidCredentials)
            | Self::Jwt(JwtError::Invalid)
            | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Auth(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(RepositoryError::Conflict(msg)) => format!("Conflict: {msg}"),
            Self::Database(_)
            | Self::Internal(_)
            | Self::Jwt(JwtError::Sign(_))
            | Self::Auth(AuthError::Repository(_) | AuthError::PasswordHash) => {
                "Internal server error".to_string()
            }
            Self::Jwt(JwtError::Invalid) => "Invalid or expired token".to_string(),
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
    fn test_token_errors_are_unauthorized() {
        assert_eq!(
            get_status(AppError::Jwt(JwtError::Invalid)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Unauthorized("missing token".to_string())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_role_gate_is_forbidden() {
        assert_eq!(
            get_status(AppError::Forbidden("viewers cannot order".to_string())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_cross_company_reads_are_not_found() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_details_redacted() {
        let response = AppError::Database(RepositoryError::DataCorruption(
            "private_product.currency: unknown currency".to_string(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
