//! Wholesale login route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cedarline_core::{WholesaleCompanyId, WholesaleRole, WholesaleUserId};

use crate::error::AppError;
use crate::middleware::auth::CurrentWholesaleUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The authenticated identity echoed back to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: WholesaleUserId,
    pub company_id: WholesaleCompanyId,
    pub name: String,
    pub role: WholesaleRole,
}

/// Login response with the bearer token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Login with email and password, returning a 12h bearer token.
///
/// POST /auth/login
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = AuthService::new(state.pool());
    let candidate = auth.login(&request.email, &request.password).await?;

    let token = state
        .jwt()
        .issue(candidate.user_id, candidate.company_id, candidate.role)?;

    tracing::info!(
        user_id = %candidate.user_id,
        company_id = %candidate.company_id,
        role = %candidate.role,
        "Wholesale user logged in"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserResponse {
            user_id: candidate.user_id,
            company_id: candidate.company_id,
            name: candidate.name,
            role: candidate.role,
        },
    }))
}

/// The current user's identity, as asserted by their token.
///
/// GET /auth/me
pub async fn me(user: CurrentWholesaleUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user_id": user.user_id,
        "company_id": user.company_id,
        "role": user.role,
    }))
}
