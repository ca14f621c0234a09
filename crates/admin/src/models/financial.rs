//! Financial record domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{AdminUserId, FinancialKind, FinancialRecordId, Money, OrderId, WholesaleOrderId};

/// A payment, refund, or adjustment against an order.
///
/// Exactly one of `order_id` and `wholesale_order_id` is set, enforced
/// by a database check constraint.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialRecord {
    pub id: FinancialRecordId,
    pub order_id: Option<OrderId>,
    pub wholesale_order_id: Option<WholesaleOrderId>,
    pub kind: FinancialKind,
    pub amount: Money,
    pub note: String,
    pub recorded_by: AdminUserId,
    pub created_at: DateTime<Utc>,
}
