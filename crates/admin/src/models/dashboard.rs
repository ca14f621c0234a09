//! Dashboard rollup types.

use serde::Serialize;

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardCounts {
    /// Retail orders awaiting confirmation.
    pub pending_orders: i64,
    /// Wholesale orders awaiting confirmation.
    pub pending_wholesale_orders: i64,
    /// Open inquiry threads.
    pub open_threads: i64,
    /// Inspection photos awaiting review.
    pub unreviewed_photos: i64,
    /// Active retail products.
    pub active_products: i64,
    /// Registered customers.
    pub customers: i64,
}
