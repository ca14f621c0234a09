//! Inspection repository: photos per wholesale order item and the
//! review data the shipping gate is computed from.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedarline_core::inspection::{self, PhotoCounts};
use cedarline_core::{
    AdminUserId, InspectionId, InspectionPhotoId, PhotoReview, WholesaleOrderId,
    WholesaleOrderItemId,
};

use super::RepositoryError;
use crate::models::inspection::{
    Inspection, InspectionDetail, InspectionPhoto, ItemInspectionSummary, OrderInspectionSummary,
};

#[derive(Debug, sqlx::FromRow)]
struct InspectionRow {
    id: i32,
    wholesale_order_item_id: i32,
    created_at: DateTime<Utc>,
}

impl From<InspectionRow> for Inspection {
    fn from(row: InspectionRow) -> Self {
        Self {
            id: InspectionId::new(row.id),
            wholesale_order_item_id: WholesaleOrderItemId::new(row.wholesale_order_item_id),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PhotoRow {
    id: i32,
    inspection_id: i32,
    object_key: String,
    content_type: String,
    review_status: String,
    review_note: Option<String>,
    uploaded_by: i32,
    reviewed_by: Option<i32>,
    uploaded_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
}

impl TryFrom<PhotoRow> for InspectionPhoto {
    type Error = RepositoryError;

    fn try_from(row: PhotoRow) -> Result<Self, Self::Error> {
        let review_status: PhotoReview =
            RepositoryError::parse_column(&row.review_status, "photo review status")?;

        Ok(Self {
            id: InspectionPhotoId::new(row.id),
            inspection_id: InspectionId::new(row.inspection_id),
            object_key: row.object_key,
            content_type: row.content_type,
            review_status,
            review_note: row.review_note,
            uploaded_by: AdminUserId::new(row.uploaded_by),
            reviewed_by: row.reviewed_by.map(AdminUserId::new),
            uploaded_at: row.uploaded_at,
            reviewed_at: row.reviewed_at,
        })
    }
}

const PHOTO_COLUMNS: &str = "id, inspection_id, object_key, content_type, review_status, \
     review_note, uploaded_by, reviewed_by, uploaded_at, reviewed_at";

/// Repository for quality-control inspections and photo reviews.
pub struct InspectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InspectionRepository<'a> {
    /// Create a new inspection repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the inspection for an order item, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order item doesn't exist.
    pub async fn get_or_create_for_item(
        &self,
        item_id: WholesaleOrderItemId,
    ) -> Result<Inspection, RepositoryError> {
        let row = sqlx::query_as::<_, InspectionRow>(
            "INSERT INTO product_inspection (wholesale_order_item_id) VALUES ($1) \
             ON CONFLICT (wholesale_order_item_id) \
             DO UPDATE SET wholesale_order_item_id = EXCLUDED.wholesale_order_item_id \
             RETURNING id, wholesale_order_item_id, created_at",
        )
        .bind(item_id.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            _ => RepositoryError::Database(e),
        })?;

        Ok(row.into())
    }

    /// Get an inspection with its photos and derived item status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_detail_for_item(
        &self,
        item_id: WholesaleOrderItemId,
    ) -> Result<Option<InspectionDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, InspectionRow>(
            "SELECT id, wholesale_order_item_id, created_at \
             FROM product_inspection WHERE wholesale_order_item_id = $1",
        )
        .bind(item_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let photo_rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM inspection_photo \
             WHERE inspection_id = $1 ORDER BY uploaded_at"
        ))
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let photos = photo_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<InspectionPhoto>, _>>()?;

        let reviews: Vec<PhotoReview> = photos.iter().map(|p| p.review_status).collect();
        let item_status = inspection::item_status(&reviews);

        Ok(Some(InspectionDetail {
            inspection: row.into(),
            photos,
            item_status,
        }))
    }

    /// Record an uploaded photo. The object must already be in storage.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the inspection doesn't exist.
    /// Returns `RepositoryError::Conflict` if the object key is already used.
    pub async fn add_photo(
        &self,
        inspection_id: InspectionId,
        object_key: &str,
        content_type: &str,
        uploaded_by: AdminUserId,
    ) -> Result<InspectionPhoto, RepositoryError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "INSERT INTO inspection_photo (inspection_id, object_key, content_type, uploaded_by) \
             VALUES ($1, $2, $3, $4) RETURNING {PHOTO_COLUMNS}"
        ))
        .bind(inspection_id.as_i32())
        .bind(object_key)
        .bind(content_type)
        .bind(uploaded_by.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            _ => RepositoryError::from_sqlx(e, "object key already recorded"),
        })?;

        row.try_into()
    }

    /// Get a photo by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_photo(
        &self,
        id: InspectionPhotoId,
    ) -> Result<Option<InspectionPhoto>, RepositoryError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM inspection_photo WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Approve or reject a photo.
    ///
    /// Re-reviewing is allowed; the latest verdict wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the photo doesn't exist.
    pub async fn review_photo(
        &self,
        id: InspectionPhotoId,
        review: PhotoReview,
        note: Option<&str>,
        reviewed_by: AdminUserId,
    ) -> Result<InspectionPhoto, RepositoryError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "UPDATE inspection_photo \
             SET review_status = $1, review_note = $2, reviewed_by = $3, reviewed_at = now() \
             WHERE id = $4 RETURNING {PHOTO_COLUMNS}"
        ))
        .bind(review.to_string())
        .bind(note)
        .bind(reviewed_by.as_i32())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Photo review states per item for one wholesale order.
    ///
    /// Every item of the order appears, with an empty review list when it
    /// has no photos yet. Feeds the shipping-readiness check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn order_review_data(
        &self,
        order_id: WholesaleOrderId,
    ) -> Result<Vec<(WholesaleOrderItemId, String, Vec<PhotoReview>)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct ReviewRow {
            item_id: i32,
            sku: String,
            review_status: Option<String>,
        }

        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT i.id AS item_id, i.sku, p.review_status \
             FROM wholesale_order_item i \
             LEFT JOIN product_inspection pi ON pi.wholesale_order_item_id = i.id \
             LEFT JOIN inspection_photo p ON p.inspection_id = pi.id \
             WHERE i.wholesale_order_id = $1 \
             ORDER BY i.id, p.uploaded_at",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let mut items: Vec<(WholesaleOrderItemId, String, Vec<PhotoReview>)> = Vec::new();
        for row in rows {
            let item_id = WholesaleOrderItemId::new(row.item_id);
            if items.last().is_none_or(|(id, _, _)| *id != item_id) {
                items.push((item_id, row.sku, Vec::new()));
            }
            if let Some(status) = row.review_status {
                let review: PhotoReview =
                    RepositoryError::parse_column(&status, "photo review status")?;
                if let Some((_, _, reviews)) = items.last_mut() {
                    reviews.push(review);
                }
            }
        }

        Ok(items)
    }

    /// Build the per-item inspection rollup for one wholesale order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn order_summary(
        &self,
        order_id: WholesaleOrderId,
    ) -> Result<OrderInspectionSummary, RepositoryError> {
        let data = self.order_review_data(order_id).await?;

        let ready = inspection::ready_to_ship(
            &data
                .iter()
                .map(|(_, _, reviews)| reviews.clone())
                .collect::<Vec<_>>(),
        );

        let items: Vec<ItemInspectionSummary> = data
            .into_iter()
            .map(|(item_id, sku, reviews)| ItemInspectionSummary {
                wholesale_order_item_id: item_id,
                sku,
                counts: PhotoCounts::tally(&reviews),
                status: inspection::item_status(&reviews),
            })
            .collect();

        let statuses: Vec<_> = items.iter().map(|i| i.status).collect();

        Ok(OrderInspectionSummary {
            order_status: inspection::order_status(&statuses),
            ready_to_ship: ready,
            items,
        })
    }

    /// Object keys of every photo attached to an order's items.
    ///
    /// Used to clean up storage after the order ships.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn photo_keys_for_order(
        &self,
        order_id: WholesaleOrderId,
    ) -> Result<Vec<String>, RepositoryError> {
        let keys: Vec<String> = sqlx::query_scalar(
            "SELECT p.object_key \
             FROM inspection_photo p \
             JOIN product_inspection pi ON pi.id = p.inspection_id \
             JOIN wholesale_order_item i ON i.id = pi.wholesale_order_item_id \
             WHERE i.wholesale_order_id = $1",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(keys)
    }
}
