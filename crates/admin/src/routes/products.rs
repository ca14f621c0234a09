//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{CategoryId, CurrencyCode, Money, ProductId, SubcategoryId};

use crate::db::products::CatalogRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::catalog::{Product, ProductDraft};
use crate::routes::require_write;
use crate::state::AppState;

/// Product form data.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub sku: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubcategoryId>,
    pub name_en: String,
    pub name_zh: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_zh: String,
    pub price: Decimal,
    pub currency: String,
    pub stock: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl ProductRequest {
    fn into_draft(self) -> Result<ProductDraft, AppError> {
        if self.sku.trim().is_empty() || self.slug.trim().is_empty() {
            return Err(AppError::BadRequest("sku and slug are required".to_string()));
        }
        if self.stock < 0 {
            return Err(AppError::BadRequest("stock must not be negative".to_string()));
        }

        let currency: CurrencyCode = self
            .currency
            .parse()
            .map_err(|e: String| AppError::BadRequest(e))?;
        let price =
            Money::new(self.price, currency).map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(ProductDraft {
            sku: self.sku,
            slug: self.slug,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            name_en: self.name_en,
            name_zh: self.name_zh,
            description_en: self.description_en,
            description_zh: self.description_zh,
            price,
            stock: self.stock,
            is_active: self.is_active,
        })
    }
}

/// List all products, including inactive ones.
///
/// GET /products
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = CatalogRepository::new(state.pool()).list_products().await?;
    Ok(Json(products))
}

/// Get a product by ID.
///
/// GET /products/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = CatalogRepository::new(state.pool())
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))?;

    Ok(Json(product))
}

/// Create a product.
///
/// POST /products
#[instrument(skip(state, admin, request), fields(sku = %request.sku))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    require_write(&admin)?;

    let draft = request.into_draft()?;
    let product = CatalogRepository::new(state.pool()).create_product(&draft).await?;

    tracing::info!(product_id = %product.id, sku = %product.sku, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields.
///
/// PUT /products/{id}
#[instrument(skip(state, admin, request))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    require_write(&admin)?;

    let draft = request.into_draft()?;
    let product = CatalogRepository::new(state.pool())
        .update_product(id, &draft)
        .await?;

    Ok(Json(product))
}

/// Active flag form data.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Activate or deactivate a product.
///
/// PUT /products/{id}/active
#[instrument(skip(state, admin))]
pub async fn set_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<ProductId>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<Product>, AppError> {
    require_write(&admin)?;

    let product = CatalogRepository::new(state.pool())
        .set_product_active(id, request.is_active)
        .await?;

    Ok(Json(product))
}
