//! Wholesale management route handlers.
//!
//! The shipped transition is gated on inspection approval: every item
//! needs at least one photo and every photo must be approved. After a
//! successful ship the photos are deleted from storage best-effort.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{
    CurrencyCode, Money, PrivateProductId, WholesaleCompanyId, WholesaleOrderId,
    WholesaleOrderStatus, WholesaleRole, WholesaleUserId,
};

use crate::db::inspections::InspectionRepository;
use crate::db::wholesale::WholesaleRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::wholesale::{
    PrivateProduct, WholesaleCompany, WholesaleOrder, WholesaleOrderDetail, WholesaleUser,
};
use crate::routes::require_write;
use crate::services::auth;
use crate::state::AppState;

// =============================================================================
// Companies
// =============================================================================

/// List all companies.
///
/// GET /wholesale/companies
pub async fn companies(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<WholesaleCompany>>, AppError> {
    let companies = WholesaleRepository::new(state.pool()).list_companies().await?;
    Ok(Json(companies))
}

/// Company form data.
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub code: String,
    pub name: String,
    pub contact_email: String,
}

/// Create a company.
///
/// POST /wholesale/companies
#[instrument(skip(state, admin, request), fields(code = %request.code))]
pub async fn create_company(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<WholesaleCompany>), AppError> {
    require_write(&admin)?;

    if request.code.trim().is_empty() || request.name.trim().is_empty() {
        return Err(AppError::BadRequest("code and name are required".to_string()));
    }

    let company = WholesaleRepository::new(state.pool())
        .create_company(request.code.trim(), request.name.trim(), &request.contact_email)
        .await?;

    tracing::info!(company_id = %company.id, code = %company.code, "Wholesale company created");

    Ok((StatusCode::CREATED, Json(company)))
}

/// Active flag form data.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// Activate or deactivate a company.
///
/// PUT /wholesale/companies/{id}/active
#[instrument(skip(state, admin))]
pub async fn set_company_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleCompanyId>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<WholesaleCompany>, AppError> {
    require_write(&admin)?;

    let company = WholesaleRepository::new(state.pool())
        .set_company_active(id, request.is_active)
        .await?;

    Ok(Json(company))
}

// =============================================================================
// Wholesale users
// =============================================================================

/// List the logins of a company.
///
/// GET /wholesale/companies/{id}/users
pub async fn users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleCompanyId>,
) -> Result<Json<Vec<WholesaleUser>>, AppError> {
    let users = WholesaleRepository::new(state.pool()).list_users(id).await?;
    Ok(Json(users))
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: WholesaleRole,
}

/// Create a login for a company.
///
/// POST /wholesale/companies/{id}/users
#[instrument(skip(state, admin, request), fields(email = %request.email))]
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleCompanyId>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<WholesaleUser>), AppError> {
    require_write(&admin)?;

    if request.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if request.password.len() < 12 {
        return Err(AppError::BadRequest(
            "password must be at least 12 characters".to_string(),
        ));
    }

    let password_hash =
        auth::hash_password(&request.password).map_err(|_| {
            AppError::Internal("password hashing failed".to_string())
        })?;

    let user = WholesaleRepository::new(state.pool())
        .create_user(
            id,
            &request.email,
            request.name.trim(),
            &password_hash,
            request.role,
        )
        .await?;

    tracing::info!(user_id = %user.id, company_id = %id, "Wholesale login created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Activate or deactivate a login.
///
/// PUT /wholesale/users/{id}/active
#[instrument(skip(state, admin))]
pub async fn set_user_active(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleUserId>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<WholesaleUser>, AppError> {
    require_write(&admin)?;

    let user = WholesaleRepository::new(state.pool())
        .set_user_active(id, request.is_active)
        .await?;

    Ok(Json(user))
}

// =============================================================================
// Private products
// =============================================================================

/// List a company's private products.
///
/// GET /wholesale/companies/{id}/products
pub async fn private_products(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleCompanyId>,
) -> Result<Json<Vec<PrivateProduct>>, AppError> {
    let products = WholesaleRepository::new(state.pool())
        .list_private_products(id)
        .await?;
    Ok(Json(products))
}

/// Private product form data.
#[derive(Debug, Deserialize)]
pub struct CreatePrivateProductRequest {
    pub sku: String,
    pub name_en: String,
    pub name_zh: String,
    pub unit_price: Decimal,
    pub currency: String,
    pub moq: i32,
}

/// Create a private product for a company.
///
/// POST /wholesale/companies/{id}/products
#[instrument(skip(state, admin, request), fields(sku = %request.sku))]
pub async fn create_private_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleCompanyId>,
    Json(request): Json<CreatePrivateProductRequest>,
) -> Result<(StatusCode, Json<PrivateProduct>), AppError> {
    require_write(&admin)?;

    if request.sku.trim().is_empty() {
        return Err(AppError::BadRequest("sku is required".to_string()));
    }
    let unit_price = parse_price(request.unit_price, &request.currency)?;
    validate_moq(request.moq)?;

    let product = WholesaleRepository::new(state.pool())
        .create_private_product(
            id,
            request.sku.trim(),
            &request.name_en,
            &request.name_zh,
            unit_price,
            request.moq,
        )
        .await?;

    tracing::info!(product_id = %product.id, company_id = %id, "Private product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Private product update form data.
#[derive(Debug, Deserialize)]
pub struct UpdatePrivateProductRequest {
    pub unit_price: Decimal,
    pub currency: String,
    pub moq: i32,
    pub is_active: bool,
}

/// Update a private product's price, MOQ, and active flag.
///
/// PUT /wholesale/products/{id}
#[instrument(skip(state, admin, request))]
pub async fn update_private_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<PrivateProductId>,
    Json(request): Json<UpdatePrivateProductRequest>,
) -> Result<Json<PrivateProduct>, AppError> {
    require_write(&admin)?;

    let unit_price = parse_price(request.unit_price, &request.currency)?;
    validate_moq(request.moq)?;

    let product = WholesaleRepository::new(state.pool())
        .update_private_product(id, unit_price, request.moq, request.is_active)
        .await?;

    Ok(Json(product))
}

// =============================================================================
// Wholesale orders
// =============================================================================

/// Listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<WholesaleOrderStatus>,
}

/// List wholesale orders, newest first.
///
/// GET /wholesale/orders
pub async fn orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<WholesaleOrder>>, AppError> {
    let orders = WholesaleRepository::new(state.pool())
        .list_orders(query.status)
        .await?;
    Ok(Json(orders))
}

/// Get a wholesale order with its items.
///
/// GET /wholesale/orders/{id}
pub async fn show_order(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleOrderId>,
) -> Result<Json<WholesaleOrderDetail>, AppError> {
    let detail = WholesaleRepository::new(state.pool())
        .get_order_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_string()))?;

    Ok(Json(detail))
}

/// Status transition form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Status the caller believes the order is in.
    pub from: WholesaleOrderStatus,
    pub to: WholesaleOrderStatus,
    pub note: Option<String>,
}

/// Move a wholesale order along its lifecycle.
///
/// POST /wholesale/orders/{id}/status
#[instrument(skip(state, admin, request), fields(from = %request.from, to = %request.to))]
pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleOrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<WholesaleOrder>, AppError> {
    require_write(&admin)?;

    if !request.from.can_transition_to(request.to) {
        return Err(AppError::BadRequest(format!(
            "cannot transition from {} to {}",
            request.from, request.to
        )));
    }

    let inspections = InspectionRepository::new(state.pool());

    if request.to == WholesaleOrderStatus::Shipped {
        let summary = inspections.order_summary(id).await?;
        if !summary.ready_to_ship {
            return Err(AppError::Conflict(
                "order is not ready to ship: all items need approved photos".to_string(),
            ));
        }
    }

    let order = WholesaleRepository::new(state.pool())
        .update_order_status(
            id,
            request.from,
            request.to,
            admin.id,
            request.note.as_deref(),
        )
        .await?;

    tracing::info!(order_id = %id, status = %order.status, changed_by = %admin.id, "Wholesale order status updated");

    // Photos have served their purpose once the order ships. Cleanup is
    // best-effort; a failed delete leaves an orphan object, not a broken
    // order.
    if order.status == WholesaleOrderStatus::Shipped {
        match inspections.photo_keys_for_order(id).await {
            Ok(keys) => {
                for key in keys {
                    if let Err(e) = state.storage().delete_object(&key).await {
                        tracing::warn!(order_id = %id, key = %key, error = %e, "Failed to delete inspection photo");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(order_id = %id, error = %e, "Failed to list inspection photos for cleanup");
            }
        }
    }

    Ok(Json(order))
}

fn parse_price(amount: Decimal, currency: &str) -> Result<Money, AppError> {
    let currency: CurrencyCode = currency
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;
    Money::new(amount, currency).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn validate_moq(moq: i32) -> Result<(), AppError> {
    if moq < 1 {
        return Err(AppError::BadRequest("moq must be at least 1".to_string()));
    }
    Ok(())
}
