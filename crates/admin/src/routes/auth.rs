//! Admin authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::auth::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::admin_user::{AdminUser, CurrentAdmin};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AdminUser>, AppError> {
    let auth = AuthService::new(state.pool());
    let admin = auth.login(&request.email, &request.password).await?;

    // Fresh session ID on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle failed: {e}")))?;
    set_current_admin(&session, &CurrentAdmin::from(&admin))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(admin_id = %admin.id, role = %admin.role, "Admin logged in");

    Ok(Json(admin))
}

/// Logout the current admin.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear failed: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the current admin.
///
/// GET /auth/me
pub async fn me(RequireAdmin(admin): RequireAdmin) -> Json<CurrentAdmin> {
    Json(admin)
}
