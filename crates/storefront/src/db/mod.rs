//! Database access layer for the storefront.
//!
//! Repositories take a `&PgPool` and return domain types from
//! `cedarline-core`. Row structs stay private to each module and are
//! converted at the boundary so corrupt data surfaces as an error
//! instead of a panic.

pub mod carts;
pub mod catalog;
pub mod inquiries;
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

    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into `Conflict`.
    pub(crate) fn from_sqlx(e: sqlx::Error, conflict_msg: &str) -> Self {
        match &e {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict(conflict_msg.to_string())
            }
            _ => Self::Database(e),
        }
    }
}

/// Create a connection pool for the storefront database.
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
