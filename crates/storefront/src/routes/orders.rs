//! Order route handlers. All require a logged-in customer.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{Email, OrderId};

use crate::db::carts::CartRepository;
use crate::db::orders::{CheckoutError, OrderRepository};
use crate::error::AppError;
use crate::middleware::auth::RequireAuth;
use crate::models::order::{Order, OrderWithItems};
use crate::state::AppState;

/// Request body for checkout.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: String,
}

/// Convert the cart into an order.
///
/// POST /orders
///
/// The confirmation email is best-effort: a send failure is logged and
/// the order still succeeds.
#[instrument(skip(state, request), fields(user_id = %user.id))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderWithItems>), AppError> {
    let address = request.shipping_address.trim();
    if address.is_empty() {
        return Err(AppError::BadRequest(
            "shipping address is required".to_string(),
        ));
    }

    let carts = CartRepository::new(state.pool());
    let cart = carts.get_or_create(user.id).await?;

    let orders = OrderRepository::new(state.pool());
    let order = orders.checkout(&cart, address).await.map_err(|e| match e {
        CheckoutError::EmptyCart => AppError::BadRequest("cart is empty".to_string()),
        CheckoutError::InsufficientStock { sku } => {
            AppError::Conflict(format!("insufficient stock for {sku}"))
        }
        CheckoutError::Repository(e) => AppError::Database(e),
    })?;

    tracing::info!(order_id = %order.order.id, total = %order.order.total, "Order placed");

    if let Ok(email) = Email::parse(&user.email) {
        if let Err(e) = state
            .email()
            .send_order_confirmation(&email, &user.name, &order)
            .await
        {
            tracing::warn!(order_id = %order.order.id, error = %e, "Order confirmation email failed");
        }
    }

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the customer's orders, newest first.
///
/// GET /orders
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_for_user(user.id).await?;

    Ok(Json(orders))
}

/// Order detail with line items.
///
/// GET /orders/{id}
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<OrderWithItems>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_for_user(user.id, OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}

/// Cancel a pending order and restock its items.
///
/// POST /orders/{id}/cancel
///
/// Only pending orders may be cancelled by the customer. Anything
/// further along requires contacting support.
#[instrument(skip(state), fields(user_id = %user.id, order_id = id))]
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Order>, AppError> {
    let repo = OrderRepository::new(state.pool());
    let order = repo.cancel_pending(user.id, OrderId::new(id)).await?;

    tracing::info!(order_id = %order.id, "Order cancelled by customer");

    Ok(Json(order))
}
