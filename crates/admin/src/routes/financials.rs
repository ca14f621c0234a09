//! Financial record route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use cedarline_core::{CurrencyCode, FinancialKind, Money, OrderId, WholesaleOrderId};

use crate::db::financials::{FinancialRepository, FinancialTarget};
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::models::financial::FinancialRecord;
use crate::routes::require_write;
use crate::state::AppState;

/// Financial record form data.
#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub kind: FinancialKind,
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub note: String,
}

/// List the records attached to a retail order.
///
/// GET /orders/{id}/financials
pub async fn index_retail(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<Vec<FinancialRecord>>, AppError> {
    let records = FinancialRepository::new(state.pool())
        .list_for(FinancialTarget::Retail(id))
        .await?;
    Ok(Json(records))
}

/// Record a payment, refund, or adjustment against a retail order.
///
/// POST /orders/{id}/financials
#[instrument(skip(state, admin, request), fields(kind = %request.kind))]
pub async fn create_retail(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<FinancialRecord>), AppError> {
    require_write(&admin)?;
    create_record(&state, FinancialTarget::Retail(id), request, admin.id).await
}

/// List the records attached to a wholesale order.
///
/// GET /wholesale/orders/{id}/financials
pub async fn index_wholesale(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<WholesaleOrderId>,
) -> Result<Json<Vec<FinancialRecord>>, AppError> {
    let records = FinancialRepository::new(state.pool())
        .list_for(FinancialTarget::Wholesale(id))
        .await?;
    Ok(Json(records))
}

/// Record a payment, refund, or adjustment against a wholesale order.
///
/// POST /wholesale/orders/{id}/financials
#[instrument(skip(state, admin, request), fields(kind = %request.kind))]
pub async fn create_wholesale(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<WholesaleOrderId>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<FinancialRecord>), AppError> {
    require_write(&admin)?;
    create_record(&state, FinancialTarget::Wholesale(id), request, admin.id).await
}

async fn create_record(
    state: &AppState,
    target: FinancialTarget,
    request: CreateRecordRequest,
    recorded_by: cedarline_core::AdminUserId,
) -> Result<(StatusCode, Json<FinancialRecord>), AppError> {
    let currency: CurrencyCode = request
        .currency
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;
    let amount =
        Money::new(request.amount, currency).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let record = FinancialRepository::new(state.pool())
        .create(target, request.kind, amount, &request.note, recorded_by)
        .await?;

    tracing::info!(record_id = %record.id, kind = %record.kind, "Financial record created");

    Ok((StatusCode::CREATED, Json(record)))
}
