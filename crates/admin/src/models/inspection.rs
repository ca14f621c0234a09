//! Quality-control inspection domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedarline_core::inspection::PhotoCounts;
use cedarline_core::{
    AdminUserId, InspectionId, InspectionPhotoId, ItemInspectionStatus, PhotoReview,
    WholesaleOrderItemId,
};

/// An inspection attached to one wholesale order item.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub id: InspectionId,
    pub wholesale_order_item_id: WholesaleOrderItemId,
    pub created_at: DateTime<Utc>,
}

/// A photo attached to an inspection.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionPhoto {
    pub id: InspectionPhotoId,
    pub inspection_id: InspectionId,
    /// Key of the stored object, not a URL.
    pub object_key: String,
    pub content_type: String,
    pub review_status: PhotoReview,
    pub review_note: Option<String>,
    pub uploaded_by: AdminUserId,
    pub reviewed_by: Option<AdminUserId>,
    pub uploaded_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// An inspection with its photos and derived item status.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionDetail {
    #[serde(flatten)]
    pub inspection: Inspection,
    pub photos: Vec<InspectionPhoto>,
    pub item_status: ItemInspectionStatus,
}

/// Per-item inspection rollup for one wholesale order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderInspectionSummary {
    pub items: Vec<ItemInspectionSummary>,
    /// Order-level status derived from item statuses.
    pub order_status: ItemInspectionStatus,
    /// Whether every item is photographed and approved.
    pub ready_to_ship: bool,
}

/// Inspection rollup for one wholesale order item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemInspectionSummary {
    pub wholesale_order_item_id: WholesaleOrderItemId,
    pub sku: String,
    pub counts: PhotoCounts,
    pub status: ItemInspectionStatus,
}
