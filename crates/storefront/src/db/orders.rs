//! Retail order repository.
//!
//! Checkout runs in a single transaction: stock is checked and
//! decremented, line items are snapshotted, and the cart is cleared.
//! A concurrent checkout that would oversell fails the whole
//! transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{
    CurrencyCode, Money, OrderId, OrderItemId, OrderStatus, ProductId, UserId,
};

use super::RepositoryError;
use crate::models::cart::Cart;
use crate::models::order::{Order, OrderItem, OrderWithItems};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
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
        let status: OrderStatus = row.status.parse().map_err(|e: String| {
            RepositoryError::DataCorruption(format!("order status in database: {e}"))
        })?;
        let currency: CurrencyCode = row.currency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;
        let total = Money::new(row.total, currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid total in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
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
        let currency: CurrencyCode = row.currency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;
        let unit_price = Money::new(row.unit_price, currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

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

const ORDER_COLUMNS: &str =
    "id, user_id, status, total, currency, shipping_address, created_at, updated_at";

/// Errors specific to checkout.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("cart is empty")]
    EmptyCart,
    /// A product lacks the stock to cover the requested quantity.
    #[error("insufficient stock for {sku}")]
    InsufficientStock {
        /// SKU of the product that ran out.
        sku: String,
    },
    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// Repository for retail orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert a cart into an order atomically.
    ///
    /// Decrements stock for each line, snapshots SKU, name, and price
    /// into `order_item`, and empties the cart. The order total is
    /// computed from the snapshots inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no items.
    /// Returns `CheckoutError::InsufficientStock` if any line exceeds
    /// available stock.
    pub async fn checkout(
        &self,
        cart: &Cart,
        shipping_address: &str,
    ) -> Result<OrderWithItems, CheckoutError> {
        if cart.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart
            .subtotal()
            .map_err(|e| RepositoryError::DataCorruption(format!("cart total: {e}")))?
            .ok_or(CheckoutError::EmptyCart)?;

        let mut tx = self.pool.begin().await?;

        for item in &cart.items {
            // Conditional decrement; zero rows means another checkout won
            let result = sqlx::query(
                "UPDATE product SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
            )
            .bind(item.quantity)
            .bind(item.product_id.as_i32())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(CheckoutError::InsufficientStock {
                    sku: item.sku.clone(),
                });
            }
        }

        let order_row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO "order" (user_id, status, total, currency, shipping_address)
            VALUES ($1, 'pending', $2, $3, $4)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(cart.user_id.as_i32())
        .bind(total.amount)
        .bind(total.currency.as_str())
        .bind(shipping_address)
        .fetch_one(&mut *tx)
        .await?;

        let order_id = order_row.id;
        let mut items = Vec::with_capacity(cart.items.len());
        for item in &cart.items {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r#"
                INSERT INTO order_item (order_id, product_id, sku, name_en, unit_price, currency, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, product_id, sku, name_en, unit_price, currency, quantity
                "#,
            )
            .bind(order_id)
            .bind(item.product_id.as_i32())
            .bind(&item.sku)
            .bind(&item.name_en)
            .bind(item.unit_price.amount)
            .bind(item.unit_price.currency.as_str())
            .bind(item.quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item_row.try_into()?);
        }

        sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
            .bind(cart.id.as_i32())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(OrderWithItems {
            order: order_row.try_into()?,
            items,
        })
    }

    /// List a customer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE user_id = $1 ORDER BY created_at DESC"#
        ))
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get one of the customer's orders with its items.
    ///
    /// Scoped to the owning customer so one user can never read
    /// another's order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_for_user(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"SELECT {ORDER_COLUMNS} FROM "order" WHERE id = $1 AND user_id = $2"#
        ))
        .bind(order_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, product_id, sku, name_en, unit_price, currency, quantity \
             FROM order_item WHERE order_id = $1 ORDER BY id",
        )
        .bind(order_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<OrderItem>, _>>()?;

        Ok(Some(OrderWithItems {
            order: row.try_into()?,
            items,
        }))
    }

    /// Cancel a pending order and restock its items.
    ///
    /// Customers may only cancel before the order is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist,
    /// belongs to someone else, or is no longer pending.
    pub async fn cancel_pending(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE "order"
            SET status = 'cancelled', updated_at = now()
            WHERE id = $1 AND user_id = $2 AND status = 'pending'
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        sqlx::query(
            r#"
            UPDATE product p
            SET stock = p.stock + oi.quantity
            FROM order_item oi
            WHERE oi.order_id = $1 AND oi.product_id = p.id
            "#,
        )
        .bind(order_id.as_i32())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        row.try_into()
    }
}
