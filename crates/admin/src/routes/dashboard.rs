//! Dashboard route handler.

use axum::{Json, extract::State};

use crate::db::dashboard::DashboardRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::dashboard::DashboardCounts;
use crate::state::AppState;

/// Headline counts for the landing page.
///
/// GET /dashboard
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<DashboardCounts>, AppError> {
    let counts = DashboardRepository::new(state.pool()).counts().await?;
    Ok(Json(counts))
}
