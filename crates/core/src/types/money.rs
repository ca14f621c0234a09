//! Monetary amounts using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing or combining [`Money`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Amount is negative.
    #[error("amount cannot be negative")]
    Negative,
    /// Arithmetic across different currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Left-hand currency.
        left: CurrencyCode,
        /// Right-hand currency.
        right: CurrencyCode,
    },
}

/// A monetary amount with currency information.
///
/// Amounts are stored in the currency's standard unit (e.g., dollars,
/// not cents) and are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: CurrencyCode,
}

impl Money {
    /// Create a new amount.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() {
            return Err(MoneyError::Negative);
        }
        Ok(Self { amount, currency })
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Add another amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::CurrencyMismatch` if the currencies differ.
    pub fn add(self, other: Self) -> Result<Self, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Scale by a line-item quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

/// ISO 4217 currency codes supported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CNY,
}

impl CurrencyCode {
    /// The ISO 4217 code as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CNY => "CNY",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CNY" => Ok(Self::CNY),
            _ => Err(format!("unsupported currency: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn usd(s: &str) -> Money {
        Money::new(dec(s), CurrencyCode::USD).unwrap()
    }

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(
            Money::new(dec("-1.00"), CurrencyCode::USD),
            Err(MoneyError::Negative)
        );
    }

    #[test]
    fn test_add_same_currency() {
        assert_eq!(usd("199.99").add(usd("0.01")).unwrap().amount, dec("200.00"));
    }

    #[test]
    fn test_add_currency_mismatch() {
        let a = usd("10");
        let b = Money::new(dec("10"), CurrencyCode::CNY).unwrap();
        assert!(matches!(a.add(b), Err(MoneyError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(usd("45.50").times(4).amount, dec("182.00"));
    }

    #[test]
    fn test_line_total_sums_like_a_cart() {
        // order total equals sum of item price x quantity
        let lines = [("120.00", 2_u32), ("35.25", 3), ("0.50", 1)];
        let total = lines
            .iter()
            .map(|(price, qty)| usd(price).times(*qty))
            .try_fold(Money::zero(CurrencyCode::USD), Money::add)
            .unwrap();
        assert_eq!(total.amount, dec("346.25"));
    }

    #[test]
    fn test_currency_code_roundtrip() {
        for code in [
            CurrencyCode::USD,
            CurrencyCode::EUR,
            CurrencyCode::GBP,
            CurrencyCode::CNY,
        ] {
            let parsed: CurrencyCode = code.as_str().parse().unwrap();
            assert_eq!(parsed, code);
        }
        assert!("JPY".parse::<CurrencyCode>().is_err());
    }
}
