//! Customer authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::auth::{RequireAuth, clear_current_user, set_current_user};
use crate::models::user::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new customer and log them in.
///
/// POST /auth/register
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&request.email, request.name.trim(), &request.password)
        .await?;

    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(user_id = %user.id, "Customer registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&request.email, &request.password).await?;

    // Fresh session ID on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("session cycle failed: {e}")))?;
    set_current_user(&session, &CurrentUser::from(&user))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(user_id = %user.id, "Customer logged in");

    Ok(Json(user))
}

/// Logout the current customer.
///
/// POST /auth/logout
pub async fn logout(session: Session) -> Result<StatusCode, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session clear failed: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get the current customer.
///
/// GET /auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
