//! Retail order management repository.
//!
//! Status updates are guarded: the UPDATE only matches when the order
//! is still in the expected status, and the audit row is written in
//! the same transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{AdminUserId, OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::{RepositoryError, parse_money};
use crate::models::order::{Order, OrderDetail, OrderItem, StatusHistoryEntry};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    customer_email: String,
    status: String,
    total: Decimal,
    currency: String,
    shipping_address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = RepositoryError::parse_column(&row.status, "order status")?;
        let total = parse_money(row.total, &row.currency)?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            customer_email: row.customer_email,
            status,
            total,
            shipping_address: row.shipping_address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    product_id: i32,
    sku: String,
    name_en: String,
    unit_price: Decimal,
    currency: String,
    quantity: i32,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = RepositoryError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let unit_price = parse_money(row.unit_price, &row.currency)?;

        Ok(Self {
            id: OrderItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            sku: row.sku,
            name_en: row.name_en,
            unit_price,
            quantity: row.quantity,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HistoryRow {
    from_status: String,
    to_status: String,
    changed_by: Option<i32>,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for StatusHistoryEntry {
    fn from(row: HistoryRow) -> Self {
        Self {
            from_status: row.from_status,
            to_status: row.to_status,
            changed_by: row.changed_by.map(AdminUserId::new),
            note: row.note,
            created_at: row.created_at,
        }
    }
}

const ORDER_SELECT: &str = r#"
    SELECT o.id, o.user_id, u.email AS customer_email, o.status, o.total,
           o.currency, o.shipping_address, o.created_at, o.updated_at
    FROM "order" o
    JOIN "user" u ON u.id = o.user_id
"#;

/// Repository for back-office retail order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{ORDER_SELECT} WHERE o.status = $1 ORDER BY o.created_at DESC"
                ))
                .bind(status.to_string())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{ORDER_SELECT} ORDER BY o.created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an order with its items and status history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_detail(&self, id: OrderId) -> Result<Option<OrderDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{ORDER_SELECT} WHERE o.id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, product_id, sku, name_en, unit_price, currency, quantity \
             FROM order_item WHERE order_id = $1 ORDER BY id",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let history_rows = sqlx::query_as::<_, HistoryRow>(
            "SELECT from_status, to_status, changed_by, note, created_at \
             FROM order_status_history WHERE order_id = $1 ORDER BY created_at",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<OrderItem>, _>>()?;

        Ok(Some(OrderDetail {
            order: row.try_into()?,
            items,
            history: history_rows.into_iter().map(Into::into).collect(),
        }))
    }

    /// Move an order from one status to another, recording the audit row.
    ///
    /// The UPDATE is guarded on the expected current status so a
    /// concurrent update loses cleanly instead of double-applying.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is no longer in
    /// `from` status.
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        changed_by: AdminUserId,
        note: Option<&str>,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i32> = sqlx::query_scalar(
            r#"UPDATE "order" SET status = $1, updated_at = now()
               WHERE id = $2 AND status = $3 RETURNING id"#,
        )
        .bind(to.to_string())
        .bind(id.as_i32())
        .bind(from.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            // Distinguish a missing order from a stale status
            let exists: Option<i32> = sqlx::query_scalar(r#"SELECT id FROM "order" WHERE id = $1"#)
                .bind(id.as_i32())
                .fetch_optional(&mut *tx)
                .await?;
            return Err(match exists {
                Some(_) => RepositoryError::Conflict(format!("order is no longer {from}")),
                None => RepositoryError::NotFound,
            });
        }

        sqlx::query(
            "INSERT INTO order_status_history (order_id, from_status, to_status, changed_by, note) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.as_i32())
        .bind(from.to_string())
        .bind(to.to_string())
        .bind(changed_by.as_i32())
        .bind(note)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!("{ORDER_SELECT} WHERE o.id = $1"))
            .bind(id.as_i32())
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }
}
