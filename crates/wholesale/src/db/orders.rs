//! Wholesale order repository.
//!
//! Placing an order runs in a single transaction: each requested
//! product is re-read inside the transaction, MOQ is enforced, SKU,
//! name, and unit price are snapshotted into `wholesale_order_item`,
//! and the total is computed server side from the snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::inspection::{self, PhotoCounts};
use cedarline_core::{
    Money, PhotoReview, PrivateProductId, WholesaleCompanyId, WholesaleOrderId,
    WholesaleOrderItemId, WholesaleUserId,
};

use super::{RepositoryError, parse_money};
use crate::models::order::{Order, OrderDetail, OrderItem, OrderLineRequest};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    placed_by: i32,
    status: String,
    total: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: WholesaleOrderId::new(row.id),
            placed_by: WholesaleUserId::new(row.placed_by),
            status: RepositoryError::parse_column(&row.status, "wholesale_order.status")?,
            total: parse_money(row.total, &row.currency)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i32,
    private_product_id: i32,
    sku: String,
    name_en: String,
    unit_price: Decimal,
    currency: String,
    quantity: i32,
}

/// A line item joined with its photo review statuses.
#[derive(Debug, sqlx::FromRow)]
struct ItemReviewRow {
    id: i32,
    private_product_id: i32,
    sku: String,
    name_en: String,
    unit_price: Decimal,
    currency: String,
    quantity: i32,
    review_status: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProductSnapshotRow {
    sku: String,
    name_en: String,
    unit_price: Decimal,
    currency: String,
    moq: i32,
}

const ORDER_COLUMNS: &str = "id, placed_by, status, total, currency, created_at, updated_at";

/// Errors specific to placing an order.
#[derive(Debug, thiserror::Error)]
pub enum PlaceOrderError {
    /// The request has no lines.
    #[error("order has no lines")]
    EmptyOrder,
    /// A requested product does not exist, is inactive, or belongs to
    /// another company.
    #[error("unknown product {0}")]
    UnknownProduct(PrivateProductId),
    /// A line quantity is below the product's minimum order quantity.
    #[error("quantity {quantity} for {sku} is below the minimum of {moq}")]
    BelowMinimum {
        /// SKU of the offending line.
        sku: String,
        /// Required minimum.
        moq: i32,
        /// What was asked for.
        quantity: u32,
    },
    /// A line quantity does not fit the storage type.
    #[error("quantity {0} is out of range")]
    QuantityTooLarge(u32),
    /// Lines mix currencies, so no single total exists.
    #[error("order mixes currencies")]
    MixedCurrencies,
    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for PlaceOrderError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Repository for wholesale orders, always scoped to one company.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Place an order atomically.
    ///
    /// Each product is re-read inside the transaction so price and MOQ
    /// changes between browsing and ordering cannot slip through. The
    /// total is the sum of snapshot prices times quantities.
    ///
    /// # Errors
    ///
    /// Returns `PlaceOrderError::EmptyOrder`, `UnknownProduct`,
    /// `BelowMinimum`, or `MixedCurrencies` for invalid requests.
    pub async fn place(
        &self,
        company_id: WholesaleCompanyId,
        placed_by: WholesaleUserId,
        lines: &[OrderLineRequest],
    ) -> Result<OrderDetail, PlaceOrderError> {
        if lines.is_empty() {
            return Err(PlaceOrderError::EmptyOrder);
        }

        let mut tx = self.pool.begin().await?;

        let mut snapshots = Vec::with_capacity(lines.len());
        let mut total: Option<Money> = None;
        for line in lines {
            let product = sqlx::query_as::<_, ProductSnapshotRow>(
                "SELECT sku, name_en, unit_price, currency, moq
                 FROM private_product
                 WHERE id = $1 AND company_id = $2 AND is_active",
            )
            .bind(line.private_product_id.as_i32())
            .bind(company_id.as_i32())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(PlaceOrderError::UnknownProduct(line.private_product_id))?;

            let quantity = i32::try_from(line.quantity)
                .map_err(|_| PlaceOrderError::QuantityTooLarge(line.quantity))?;
            if quantity < product.moq {
                return Err(PlaceOrderError::BelowMinimum {
                    sku: product.sku,
                    moq: product.moq,
                    quantity: line.quantity,
                });
            }

            let unit_price = parse_money(product.unit_price, &product.currency)?;
            let line_total = unit_price.times(line.quantity);
            total = Some(match total {
                None => line_total,
                Some(t) => t
                    .add(line_total)
                    .map_err(|_| PlaceOrderError::MixedCurrencies)?,
            });
            snapshots.push((line, product, unit_price, quantity));
        }

        let total = total.ok_or(PlaceOrderError::EmptyOrder)?;

        let order_row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO wholesale_order (company_id, placed_by, status, total, currency)
             VALUES ($1, $2, 'pending', $3, $4)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(company_id.as_i32())
        .bind(placed_by.as_i32())
        .bind(total.amount)
        .bind(total.currency.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let order_id = order_row.id;
        let mut items = Vec::with_capacity(snapshots.len());
        for (line, product, unit_price, quantity) in snapshots {
            let item_row = sqlx::query_as::<_, ItemRow>(
                "INSERT INTO wholesale_order_item
                     (wholesale_order_id, private_product_id, sku, name_en,
                      unit_price, currency, quantity)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING id, private_product_id, sku, name_en, unit_price, currency, quantity",
            )
            .bind(order_id)
            .bind(line.private_product_id.as_i32())
            .bind(&product.sku)
            .bind(&product.name_en)
            .bind(unit_price.amount)
            .bind(unit_price.currency.as_str())
            .bind(quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: WholesaleOrderItemId::new(item_row.id),
                private_product_id: PrivateProductId::new(item_row.private_product_id),
                sku: item_row.sku,
                name_en: item_row.name_en,
                unit_price: parse_money(item_row.unit_price, &item_row.currency)?,
                quantity: item_row.quantity,
                inspection_status: inspection::item_status(&[]),
                photo_counts: PhotoCounts::default(),
            });
        }

        tx.commit().await?;

        Ok(OrderDetail {
            order: order_row.try_into()?,
            items,
        })
    }

    /// List the company's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_company(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM wholesale_order
             WHERE company_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(company_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get one of the company's orders with items and inspection tallies.
    ///
    /// Scoped to the owning company so one buyer can never read
    /// another's order. Each item carries the review counts of its
    /// inspection photos; items without photos report a status of `none`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_detail_for_company(
        &self,
        company_id: WholesaleCompanyId,
        order_id: WholesaleOrderId,
    ) -> Result<Option<OrderDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM wholesale_order
             WHERE id = $1 AND company_id = $2"
        ))
        .bind(order_id.as_i32())
        .bind(company_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, ItemReviewRow>(
            "SELECT i.id, i.private_product_id, i.sku, i.name_en,
                    i.unit_price, i.currency, i.quantity,
                    p.review_status
             FROM wholesale_order_item i
             LEFT JOIN product_inspection pi ON pi.wholesale_order_item_id = i.id
             LEFT JOIN inspection_photo p ON p.inspection_id = pi.id
             WHERE i.wholesale_order_id = $1
             ORDER BY i.id, p.uploaded_at",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        // Rows are ordered by item; fold consecutive photo rows into one
        // item with its review list.
        let mut grouped: Vec<(ItemReviewRow, Vec<PhotoReview>)> = Vec::new();
        for item_row in item_rows {
            let review = item_row
                .review_status
                .as_deref()
                .map(|s| RepositoryError::parse_column(s, "inspection_photo.review_status"))
                .transpose()?;

            if grouped.last().is_none_or(|(prev, _)| prev.id != item_row.id) {
                grouped.push((item_row, Vec::new()));
            }
            if let (Some(review), Some((_, reviews))) = (review, grouped.last_mut()) {
                reviews.push(review);
            }
        }

        let items = grouped
            .into_iter()
            .map(|(item_row, reviews)| {
                Ok(OrderItem {
                    id: WholesaleOrderItemId::new(item_row.id),
                    private_product_id: PrivateProductId::new(item_row.private_product_id),
                    sku: item_row.sku,
                    name_en: item_row.name_en,
                    unit_price: parse_money(item_row.unit_price, &item_row.currency)?,
                    quantity: item_row.quantity,
                    inspection_status: inspection::item_status(&reviews),
                    photo_counts: PhotoCounts::tally(&reviews),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(Some(OrderDetail {
            order: row.try_into()?,
            items,
        }))
    }
}
