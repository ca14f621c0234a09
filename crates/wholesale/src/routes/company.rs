//! Company profile route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use cedarline_core::WholesaleRole;

use crate::db::company::CompanyRepository;
use crate::error::AppError;
use crate::middleware::auth::CurrentWholesaleUser;
use crate::models::company::{CompanyMember, CompanyProfile};
use crate::state::AppState;

/// The authenticated user's company profile.
///
/// GET /company
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn profile(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = CompanyRepository::new(state.pool())
        .get_profile(user.company_id)
        .await?;
    Ok(Json(profile))
}

/// List everyone on the company account. Owners only.
///
/// GET /company/users
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn members(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
) -> Result<Json<Vec<CompanyMember>>, AppError> {
    if user.role != WholesaleRole::Owner {
        return Err(AppError::Forbidden(
            "only owners may list account members".to_string(),
        ));
    }

    let members = CompanyRepository::new(state.pool())
        .list_members(user.company_id)
        .await?;
    Ok(Json(members))
}
