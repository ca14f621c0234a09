//! Database access layer for the wholesale portal.
//!
//! Same conventions as the storefront: private row structs, domain
//! types out, corruption surfaced as errors. Every query here is scoped
//! to a company ID taken from the caller's token, never from request
//! input.

pub mod catalog;
pub mod company;
pub mod orders;
pub mod users;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors surfaced by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying sqlx failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be parsed into its domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The requested row does not exist (or is out of company scope).
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Parse a stored enum value, mapping failure to `DataCorruption`.
    pub(crate) fn parse_column<T>(value: &str, column: &str) -> Result<T, Self>
    where
        T: std::str::FromStr<Err = String>,
    {
        value
            .parse()
            .map_err(|e: String| Self::DataCorruption(format!("{column}: {e}")))
    }
}

/// Parse a stored amount and currency pair into `Money`.
pub(crate) fn parse_money(
    amount: rust_decimal::Decimal,
    currency: &str,
) -> Result<cedarline_core::Money, RepositoryError> {
    let currency: cedarline_core::CurrencyCode = currency
        .parse()
        .map_err(|e: String| RepositoryError::DataCorruption(format!("currency: {e}")))?;
    cedarline_core::Money::new(amount, currency)
        .map_err(|e| RepositoryError::DataCorruption(format!("amount: {e}")))
}

/// Create a connection pool for the wholesale database.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url.expose_secret())
        .await
}
