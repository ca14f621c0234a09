//! Shopping cart domain types.

use serde::Serialize;

use cedarline_core::{CartId, CartItemId, Money, MoneyError, ProductId, UserId};

/// A customer's shopping cart with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: CartId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

/// A single line in a cart, joined with live product data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub sku: String,
    pub name_en: String,
    pub name_zh: String,
    pub unit_price: Money,
    pub quantity: i32,
    /// Current stock of the underlying product, for availability checks.
    pub stock: i32,
}

/// A cart line with its computed total.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    #[serde(flatten)]
    pub item: CartItem,
    pub line_total: Money,
}

/// Cart as returned to clients, with line and cart totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: CartId,
    pub items: Vec<CartItemView>,
    /// `None` when the cart is empty.
    pub subtotal: Option<Money>,
}

impl Cart {
    /// Sum of `unit_price * quantity` over all items.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if items carry different
    /// currencies, which indicates corrupt catalog data.
    pub fn subtotal(&self) -> Result<Option<Money>, MoneyError> {
        let mut total: Option<Money> = None;
        for item in &self.items {
            #[allow(clippy::cast_sign_loss)]
            let line = item.unit_price.times(item.quantity.max(0) as u32);
            total = Some(match total {
                Some(t) => t.add(line)?,
                None => line,
            });
        }
        Ok(total)
    }

    /// Build the client-facing view with computed totals.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if items carry different
    /// currencies, which indicates corrupt catalog data.
    pub fn into_view(self) -> Result<CartView, MoneyError> {
        let subtotal = self.subtotal()?;
        let items = self
            .items
            .into_iter()
            .map(|item| {
                #[allow(clippy::cast_sign_loss)]
                let line_total = item.unit_price.times(item.quantity.max(0) as u32);
                CartItemView { item, line_total }
            })
            .collect();

        Ok(CartView {
            id: self.id,
            items,
            subtotal,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use cedarline_core::CurrencyCode;
    use rust_decimal::Decimal;

    use super::*;

    fn usd(s: &str) -> Money {
        Money::new(Decimal::from_str(s).unwrap(), CurrencyCode::USD).unwrap()
    }

    fn item(id: i32, price: &str, quantity: i32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product_id: ProductId::new(id),
            sku: format!("SKU-{id}"),
            name_en: "Walnut Side Table".to_string(),
            name_zh: "胡桃木边桌".to_string(),
            unit_price: usd(price),
            quantity,
            stock: 100,
        }
    }

    #[test]
    fn test_subtotal_empty_cart() {
        let cart = Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            items: vec![],
        };
        assert!(cart.subtotal().unwrap().is_none());
    }

    #[test]
    fn test_subtotal_sums_lines() {
        let cart = Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            items: vec![item(1, "199.50", 2), item(2, "49.00", 1)],
        };
        assert_eq!(cart.subtotal().unwrap().unwrap(), usd("448.00"));
    }

    #[test]
    fn test_view_computes_line_totals() {
        let cart = Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            items: vec![item(1, "199.50", 2), item(2, "49.00", 1)],
        };
        let view = cart.into_view().unwrap();
        assert_eq!(view.items[0].line_total, usd("399.00"));
        assert_eq!(view.items[1].line_total, usd("49.00"));
        assert_eq!(view.subtotal.unwrap(), usd("448.00"));
    }

    #[test]
    fn test_subtotal_mixed_currencies_fails() {
        let mut eur_item = item(2, "10.00", 1);
        eur_item.unit_price =
            Money::new(Decimal::from_str("10.00").unwrap(), CurrencyCode::EUR).unwrap();
        let cart = Cart {
            id: CartId::new(1),
            user_id: UserId::new(1),
            items: vec![item(1, "10.00", 1), eur_item],
        };
        assert!(cart.subtotal().is_err());
    }
}
