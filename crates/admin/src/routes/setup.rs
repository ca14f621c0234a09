//! First-run provisioning.
//!
//! `POST /setup` works exactly once: while no admin user exists it
//! creates the initial super admin, afterwards it always conflicts.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::middleware::auth::set_current_admin;
use crate::models::admin_user::{AdminUser, CurrentAdmin};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Bootstrap form data.
#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Create the first super admin and log them in.
///
/// POST /setup
#[instrument(skip_all, fields(email = %request.email))]
pub async fn bootstrap(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SetupRequest>,
) -> Result<(StatusCode, Json<AdminUser>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let auth = AuthService::new(state.pool());
    let admin = auth
        .bootstrap(&request.email, request.name.trim(), &request.password)
        .await?;

    set_current_admin(&session, &CurrentAdmin::from(&admin))
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    tracing::info!(admin_id = %admin.id, "Instance provisioned with initial super admin");

    Ok((StatusCode::CREATED, Json(admin)))
}
