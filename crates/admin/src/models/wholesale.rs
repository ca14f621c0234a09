//! Wholesale domain types as seen by the back office.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{
    Money, PrivateProductId, WholesaleCompanyId, WholesaleOrderId, WholesaleOrderItemId,
    WholesaleOrderStatus, WholesaleRole, WholesaleUserId,
};

/// A wholesale buyer company.
#[derive(Debug, Clone, Serialize)]
pub struct WholesaleCompany {
    pub id: WholesaleCompanyId,
    /// Short unique code used in references (e.g. "ACME").
    pub code: String,
    pub name: String,
    pub contact_email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A login for a wholesale company.
#[derive(Debug, Clone, Serialize)]
pub struct WholesaleUser {
    pub id: WholesaleUserId,
    pub company_id: WholesaleCompanyId,
    pub email: String,
    pub name: String,
    pub role: WholesaleRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A product visible only to one company.
#[derive(Debug, Clone, Serialize)]
pub struct PrivateProduct {
    pub id: PrivateProductId,
    pub company_id: WholesaleCompanyId,
    pub sku: String,
    pub name_en: String,
    pub name_zh: String,
    pub unit_price: Money,
    /// Minimum order quantity.
    pub moq: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A wholesale order.
#[derive(Debug, Clone, Serialize)]
pub struct WholesaleOrder {
    pub id: WholesaleOrderId,
    pub company_id: WholesaleCompanyId,
    pub placed_by: WholesaleUserId,
    pub status: WholesaleOrderStatus,
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item on a wholesale order.
#[derive(Debug, Clone, Serialize)]
pub struct WholesaleOrderItem {
    pub id: WholesaleOrderItemId,
    pub private_product_id: PrivateProductId,
    pub sku: String,
    pub name_en: String,
    pub unit_price: Money,
    pub quantity: i32,
}

/// A wholesale order with its items.
#[derive(Debug, Clone, Serialize)]
pub struct WholesaleOrderDetail {
    #[serde(flatten)]
    pub order: WholesaleOrder,
    pub items: Vec<WholesaleOrderItem>,
}
