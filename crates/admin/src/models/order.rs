//! Retail order domain types as seen by the back office.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{AdminUserId, Money, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A retail order with customer context.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Customer email, joined for back-office display.
    pub customer_email: String,
    pub status: OrderStatus,
    pub total: Money,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub sku: String,
    pub name_en: String,
    pub unit_price: Money,
    pub quantity: i32,
}

/// One entry in an order's status audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct StatusHistoryEntry {
    pub from_status: String,
    pub to_status: String,
    pub changed_by: Option<AdminUserId>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An order with items and its audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub history: Vec<StatusHistoryEntry>,
}
