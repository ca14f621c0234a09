//! Category and subcategory management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{CategoryId, SubcategoryId};

use crate::db::products::CatalogRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::catalog::{Category, Subcategory};
use crate::routes::require_write;
use crate::state::AppState;

/// Category form data.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub slug: String,
    pub name_en: String,
    pub name_zh: String,
    #[serde(default)]
    pub position: i32,
}

/// List all categories.
///
/// GET /categories
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = CatalogRepository::new(state.pool()).list_categories().await?;
    Ok(Json(categories))
}

/// Create a category.
///
/// POST /categories
#[instrument(skip(state, admin), fields(slug = %request.slug))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    require_write(&admin)?;
    validate(&request)?;

    let category = CatalogRepository::new(state.pool())
        .create_category(
            &request.slug,
            &request.name_en,
            &request.name_zh,
            request.position,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
///
/// PUT /categories/{id}
#[instrument(skip(state, admin))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Category>, AppError> {
    require_write(&admin)?;
    validate(&request)?;

    let category = CatalogRepository::new(state.pool())
        .update_category(
            id,
            &request.slug,
            &request.name_en,
            &request.name_zh,
            request.position,
        )
        .await?;

    Ok(Json(category))
}

/// Delete a category. Conflicts while products reference it.
///
/// DELETE /categories/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, AppError> {
    require_write(&admin)?;

    CatalogRepository::new(state.pool()).delete_category(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the subcategories of a category.
///
/// GET /categories/{id}/subcategories
pub async fn subcategories(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<CategoryId>,
) -> Result<Json<Vec<Subcategory>>, AppError> {
    let subcategories = CatalogRepository::new(state.pool())
        .list_subcategories(id)
        .await?;
    Ok(Json(subcategories))
}

/// Create a subcategory.
///
/// POST /categories/{id}/subcategories
#[instrument(skip(state, admin), fields(slug = %request.slug))]
pub async fn create_subcategory(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Subcategory>), AppError> {
    require_write(&admin)?;
    validate(&request)?;

    let subcategory = CatalogRepository::new(state.pool())
        .create_subcategory(
            id,
            &request.slug,
            &request.name_en,
            &request.name_zh,
            request.position,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(subcategory)))
}

/// Delete a subcategory.
///
/// DELETE /subcategories/{id}
#[instrument(skip(state, admin))]
pub async fn remove_subcategory(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<SubcategoryId>,
) -> Result<StatusCode, AppError> {
    require_write(&admin)?;

    CatalogRepository::new(state.pool()).delete_subcategory(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn validate(request: &CategoryRequest) -> Result<(), AppError> {
    if request.slug.trim().is_empty() || request.name_en.trim().is_empty() {
        return Err(AppError::BadRequest(
            "slug and name_en are required".to_string(),
        ));
    }
    Ok(())
}
