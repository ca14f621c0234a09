//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::db::catalog::{CatalogRepository, ProductFilter};
use crate::error::AppError;
use crate::models::catalog::{Product, ProductPage};
use crate::state::AppState;

/// Default page size for the product listing.
const DEFAULT_PER_PAGE: u32 = 20;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Restrict to a category by slug.
    pub category: Option<String>,
    /// Restrict to a subcategory by slug.
    pub subcategory: Option<String>,
    /// Substring search over both product names.
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// List active products, newest first.
///
/// GET /products?category=&subcategory=&q=&page=&per_page=
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductPage>, AppError> {
    let filter = ProductFilter {
        category_slug: query.category,
        subcategory_slug: query.subcategory,
        search: query.q.filter(|q| !q.trim().is_empty()),
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
    };

    let repo = CatalogRepository::new(state.pool());
    let (items, total) = repo.search_active_products(&filter).await?;

    Ok(Json(ProductPage {
        items,
        total,
        page: filter.page.max(1),
        per_page: filter.per_page.clamp(1, 100),
    }))
}

/// Product detail by slug.
///
/// GET /products/{slug}
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, AppError> {
    let repo = CatalogRepository::new(state.pool());
    let product = repo
        .get_active_product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    Ok(Json(product))
}
