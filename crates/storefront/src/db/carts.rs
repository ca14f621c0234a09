//! Shopping cart repository.
//!
//! Each customer has at most one cart, created lazily on first use.
//! Cart items join against live product rows so price and stock stay
//! current until checkout snapshots them.

use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{CartId, CartItemId, CurrencyCode, Money, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem};

#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: i32,
    product_id: i32,
    sku: String,
    name_en: String,
    name_zh: String,
    price: Decimal,
    currency: String,
    quantity: i32,
    stock: i32,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = RepositoryError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let currency: CurrencyCode = row.currency.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid currency in database: {e}"))
        })?;
        let unit_price = Money::new(row.price, currency).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Self {
            id: CartItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            sku: row.sku,
            name_en: row.name_en,
            name_zh: row.name_zh,
            unit_price,
            quantity: row.quantity,
            stock: row.stock,
        })
    }
}

/// Repository for shopping carts.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the customer's cart, creating an empty one if none exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let cart_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO cart (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
            RETURNING id
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        let items = self.load_items(CartId::new(cart_id)).await?;

        Ok(Cart {
            id: CartId::new(cart_id),
            user_id,
            items,
        })
    }

    /// Add a product to the cart, or bump the quantity if it is
    /// already there.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO cart_item (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity
            "#,
        )
        .bind(cart_id.as_i32())
        .bind(product_id.as_i32())
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Set the quantity of an existing cart item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not in this cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn set_quantity(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE cart_item SET quantity = $1 WHERE id = $2 AND cart_id = $3")
            .bind(quantity)
            .bind(item_id.as_i32())
            .bind(cart_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not in this cart.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_item WHERE id = $1 AND cart_id = $2")
            .bind(item_id.as_i32())
            .bind(cart_id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove every item from the cart. Used after checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, cart_id: CartId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_item WHERE cart_id = $1")
            .bind(cart_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    async fn load_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT ci.id, ci.product_id, p.sku, p.name_en, p.name_zh,
                   p.price, p.currency, ci.quantity, p.stock
            FROM cart_item ci
            JOIN product p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            "#,
        )
        .bind(cart_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
