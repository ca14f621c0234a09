//! Retail order management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{OrderId, OrderStatus};

use crate::db::orders::OrderRepository;
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::order::{Order, OrderDetail};
use crate::routes::require_write;
use crate::state::AppState;

/// Listing filter.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
}

/// List orders, newest first.
///
/// GET /orders
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool()).list(query.status).await?;
    Ok(Json(orders))
}

/// Get an order with its items and status history.
///
/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = OrderRepository::new(state.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_string()))?;

    Ok(Json(detail))
}

/// Status transition form data.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Status the caller believes the order is in.
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub note: Option<String>,
}

/// Move an order along its lifecycle.
///
/// POST /orders/{id}/status
///
/// The transition must be valid for the lifecycle, and the order must
/// still be in the `from` status when the update lands.
#[instrument(skip(state, admin, request), fields(from = %request.from, to = %request.to))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Order>, AppError> {
    require_write(&admin)?;

    if !request.from.can_transition_to(request.to) {
        return Err(AppError::BadRequest(format!(
            "cannot transition from {} to {}",
            request.from, request.to
        )));
    }

    let order = OrderRepository::new(state.pool())
        .update_status(
            id,
            request.from,
            request.to,
            admin.id,
            request.note.as_deref(),
        )
        .await?;

    tracing::info!(order_id = %id, status = %order.status, changed_by = %admin.id, "Order status updated");

    Ok(Json(order))
}
