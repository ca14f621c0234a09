//! The private catalog as seen by a buyer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::{Money, PrivateProductId};

/// A product visible to the authenticated company.
///
/// Company scoping happens in the repository, so this type carries no
/// company ID.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogProduct {
    pub id: PrivateProductId,
    pub sku: String,
    pub name_en: String,
    pub name_zh: String,
    pub unit_price: Money,
    /// Minimum order quantity.
    pub moq: i32,
    pub created_at: DateTime<Utc>,
}
