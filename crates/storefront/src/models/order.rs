//! Retail order domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{Money, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

/// A placed retail order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Money,
    pub shipping_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item snapshot taken at checkout.
///
/// Product edits after checkout never change these fields.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub sku: String,
    pub name_en: String,
    pub unit_price: Money,
    pub quantity: i32,
}

/// An order together with its items, as returned to the customer.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
