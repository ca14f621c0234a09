//! Dashboard rollup queries.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::dashboard::DashboardCounts;

/// Repository for the dashboard headline counts.
pub struct DashboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardRepository<'a> {
    /// Create a new dashboard repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gather the headline counts in one round trip.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn counts(&self) -> Result<DashboardCounts, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CountsRow {
            pending_orders: i64,
            pending_wholesale_orders: i64,
            open_threads: i64,
            unreviewed_photos: i64,
            active_products: i64,
            customers: i64,
        }

        let row = sqlx::query_as::<_, CountsRow>(
            r#"SELECT
                (SELECT COUNT(*) FROM "order" WHERE status = 'pending') AS pending_orders,
                (SELECT COUNT(*) FROM wholesale_order WHERE status = 'pending')
                    AS pending_wholesale_orders,
                (SELECT COUNT(*) FROM email_thread WHERE status = 'open') AS open_threads,
                (SELECT COUNT(*) FROM inspection_photo WHERE review_status = 'unreviewed')
                    AS unreviewed_photos,
                (SELECT COUNT(*) FROM product WHERE is_active) AS active_products,
                (SELECT COUNT(*) FROM "user") AS customers"#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(DashboardCounts {
            pending_orders: row.pending_orders,
            pending_wholesale_orders: row.pending_wholesale_orders,
            open_threads: row.open_threads,
            unreviewed_photos: row.unreviewed_photos,
            active_products: row.active_products,
            customers: row.customers,
        })
    }
}
