//! Category route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use cedarline_core::CategoryId;

use crate::db::catalog::CatalogRepository;
use crate::error::AppError;
use crate::models::catalog::{Category, Subcategory};
use crate::state::AppState;

/// List all categories in display order.
///
/// GET /categories
///
/// Served from a short-lived in-process cache since the category tree
/// changes rarely but is requested on every page load.
pub async fn index(State(state): State<AppState>) -> Result<Json<Arc<Vec<Category>>>, AppError> {
    let categories = state
        .category_cache()
        .try_get_with((), async {
            let repo = CatalogRepository::new(state.pool());
            repo.list_categories().await.map(Arc::new)
        })
        .await
        .map_err(|e| AppError::Internal(format!("category listing failed: {e}")))?;

    Ok(Json(categories))
}

/// List the subcategories of a category.
///
/// GET /categories/{id}/subcategories
pub async fn subcategories(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Subcategory>>, AppError> {
    let repo = CatalogRepository::new(state.pool());
    let subcategories = repo.list_subcategories(CategoryId::new(id)).await?;

    Ok(Json(subcategories))
}
