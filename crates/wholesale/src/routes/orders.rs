//! Wholesale order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::WholesaleOrderId;

use crate::db::RepositoryError;
use crate::db::orders::{OrderRepository, PlaceOrderError};
use crate::error::AppError;
use crate::middleware::auth::CurrentWholesaleUser;
use crate::models::order::{Order, OrderDetail, OrderLineRequest};
use crate::state::AppState;

/// Request body for placing an order.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub lines: Vec<OrderLineRequest>,
}

/// Place an order for the company.
///
/// POST /orders
///
/// Viewers can browse but not order.
#[instrument(skip(state, user, request), fields(company_id = %user.company_id, user_id = %user.user_id))]
pub async fn place(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<OrderDetail>), AppError> {
    if !user.role.can_order() {
        return Err(AppError::Forbidden(
            "your role does not permit placing orders".to_string(),
        ));
    }

    let detail = OrderRepository::new(state.pool())
        .place(user.company_id, user.user_id, &request.lines)
        .await
        .map_err(map_place_error)?;

    tracing::info!(
        order_id = %detail.order.id,
        lines = detail.items.len(),
        "Wholesale order placed"
    );

    Ok((StatusCode::CREATED, Json(detail)))
}

/// List the company's orders, newest first.
///
/// GET /orders
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn index(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderRepository::new(state.pool())
        .list_for_company(user.company_id)
        .await?;
    Ok(Json(orders))
}

/// Get one order with items and inspection tallies.
///
/// GET /orders/{id}
#[instrument(skip(state, user), fields(company_id = %user.company_id))]
pub async fn show(
    State(state): State<AppState>,
    user: CurrentWholesaleUser,
    Path(id): Path<WholesaleOrderId>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = OrderRepository::new(state.pool())
        .get_detail_for_company(user.company_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(detail))
}

/// Map placement failures onto HTTP semantics.
///
/// An out-of-scope product reads as 404 so the response does not reveal
/// whether the ID exists for another company.
fn map_place_error(e: PlaceOrderError) -> AppError {
    match e {
        PlaceOrderError::UnknownProduct(id) => AppError::NotFound(format!("product {id}")),
        PlaceOrderError::EmptyOrder
        | PlaceOrderError::BelowMinimum { .. }
        | PlaceOrderError::QuantityTooLarge(_)
        | PlaceOrderError::MixedCurrencies => AppError::BadRequest(e.to_string()),
        PlaceOrderError::Repository(RepositoryError::NotFound) => {
            AppError::NotFound("order".to_string())
        }
        PlaceOrderError::Repository(e) => AppError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use cedarline_core::PrivateProductId;

    use super::*;

    #[test]
    fn test_unknown_product_maps_to_not_found() {
        let err = map_place_error(PlaceOrderError::UnknownProduct(PrivateProductId::new(9)));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_below_minimum_maps_to_bad_request() {
        let err = map_place_error(PlaceOrderError::BelowMinimum {
            sku: "CHAIR-01".to_string(),
            moq: 50,
            quantity: 10,
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
