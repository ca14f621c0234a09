//! Private catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use cedarline_core::PrivateProductId;

use crate::db::catalog::CatalogRepository;
use crate::error::AppError;
use crate::middleware::auth::CurrentWholesaleUser;
use crate::models::catalog::CatalogProduct;
use crate::state::AppState;

/// List the company's active private products.
///
/// GET /catalog
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn index(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
) -> Result<Json<Vec<CatalogProduct>>, AppError> {
    let products = CatalogRepository::new(state.pool())
        .list(user.company_id)
        .await?;
    Ok(Json(products))
}

/// Get one product by ID.
///
/// GET /catalog/{id}
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn show(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
    Path(id): Path<PrivateProductId>,
) -> Result<Json<CatalogProduct>, AppError> {
    let product = CatalogRepository::new(state.pool())
        .get(user.company_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}
