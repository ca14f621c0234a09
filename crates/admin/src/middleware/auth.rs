//! Authentication extractors backed by the admin session.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use cedarline_core::AdminRole;

use crate::models::admin_user::{CurrentAdmin, session_keys};

/// Extractor that requires a logged-in admin of any role.
///
/// Returns 401 with a JSON body when no admin is in the session.
/// Handlers that mutate data must additionally check `role.can_write()`.
pub struct RequireAdmin(pub CurrentAdmin);

/// Extractor that requires a logged-in super admin.
///
/// Returns 401 when not logged in, 403 for any other role.
pub struct RequireSuperAdmin(pub CurrentAdmin);

/// Rejection for unauthenticated or under-privileged requests.
pub enum AdminAuthRejection {
    Unauthenticated,
    Forbidden,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "authentication required" })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "insufficient permissions" })),
            )
                .into_response(),
        }
    }
}

async fn current_admin(parts: &mut Parts) -> Result<CurrentAdmin, AdminAuthRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(AdminAuthRejection::Unauthenticated)?;

    session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .ok_or(AdminAuthRejection::Unauthenticated)
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(current_admin(parts).await?))
    }
}

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = current_admin(parts).await?;
        if admin.role != AdminRole::SuperAdmin {
            return Err(AdminAuthRejection::Forbidden);
        }
        Ok(Self(admin))
    }
}

/// Store the admin in the session after login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Clear the admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}
