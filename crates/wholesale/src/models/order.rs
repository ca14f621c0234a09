//! Wholesale order types as seen by the buyer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::inspection::PhotoCounts;
use cedarline_core::{
    ItemInspectionStatus, Money, PrivateProductId, WholesaleOrderId, WholesaleOrderItemId,
    WholesaleOrderStatus, WholesaleUserId,
};

/// An order placed by the company.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: WholesaleOrderId,
    pub placed_by: WholesaleUserId,
    pub status: WholesaleOrderStatus,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item with its quality-control state.
///
/// Buyers see the review tally, not the photos themselves; photo review
/// stays inside the back office.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: WholesaleOrderItemId,
    pub private_product_id: PrivateProductId,
    pub sku: String,
    pub name_en: String,
    pub unit_price: Money,
    pub quantity: i32,
    pub inspection_status: ItemInspectionStatus,
    pub photo_counts: PhotoCounts,
}

/// An order with its items and inspection progress.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One requested line when placing an order.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OrderLineRequest {
    pub private_product_id: PrivateProductId,
    pub quantity: u32,
}
