//! Admin user management route handlers. Super admin only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{AdminRole, AdminUserId};

use crate::db::admin_users::AdminUserRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireSuperAdmin;
use crate::models::admin_user::AdminUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// List all admin users.
///
/// GET /admins
pub async fn index(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> Result<Json<Vec<AdminUser>>, AppError> {
    let admins = AdminUserRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}

/// New admin form data.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: AdminRole,
}

/// Create an admin user.
///
/// POST /admins
#[instrument(skip_all, fields(email = %request.email, role = %request.role))]
pub async fn create(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminUser>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    let auth = AuthService::new(state.pool());
    let created = auth
        .create(
            &request.email,
            request.name.trim(),
            &request.password,
            request.role,
        )
        .await?;

    tracing::info!(admin_id = %created.id, created_by = %admin.id, "Admin user created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Role change form data.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: AdminRole,
}

/// Change an admin user's role.
///
/// PUT /admins/{id}/role
///
/// The last super admin can never be demoted.
#[instrument(skip(state, admin))]
pub async fn update_role(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<AdminUserId>,
    Json(request): Json<UpdateRoleRequest>,
) -> Result<Json<AdminUser>, AppError> {
    let repo = AdminUserRepository::new(state.pool());

    if request.role != AdminRole::SuperAdmin {
        guard_last_super_admin(&repo, id).await?;
    }

    let updated = repo.update_role(id, request.role).await?;

    tracing::info!(admin_id = %id, role = %request.role, changed_by = %admin.id, "Admin role changed");

    Ok(Json(updated))
}

/// Delete an admin user.
///
/// DELETE /admins/{id}
///
/// The last super admin can never be deleted.
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireSuperAdmin(admin): RequireSuperAdmin,
    Path(id): Path<AdminUserId>,
) -> Result<StatusCode, AppError> {
    let repo = AdminUserRepository::new(state.pool());

    guard_last_super_admin(&repo, id).await?;

    repo.delete(id).await?;

    tracing::info!(admin_id = %id, deleted_by = %admin.id, "Admin user deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Refuse to demote or delete the only remaining super admin.
async fn guard_last_super_admin(
    repo: &AdminUserRepository<'_>,
    id: AdminUserId,
) -> Result<(), AppError> {
    let target = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("admin user not found".to_string()))?;

    if target.role == AdminRole::SuperAdmin
        && repo.count_by_role(AdminRole::SuperAdmin).await? <= 1
    {
        return Err(AppError::Conflict(
            "cannot remove the last super admin".to_string(),
        ));
    }

    Ok(())
}
