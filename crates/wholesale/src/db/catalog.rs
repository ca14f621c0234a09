//! Company-scoped private catalog repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{PrivateProductId, WholesaleCompanyId};

use super::{RepositoryError, parse_money};
use crate::models::catalog::CatalogProduct;

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    sku: String,
    name_en: String,
    name_zh: String,
    unit_price: Decimal,
    currency: String,
    moq: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for CatalogProduct {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PrivateProductId::new(row.id),
            sku: row.sku,
            name_en: row.name_en,
            name_zh: row.name_zh,
            unit_price: parse_money(row.unit_price, &row.currency)?,
            moq: row.moq,
            created_at: row.created_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, sku, name_en, name_zh, unit_price, currency, moq, created_at";

/// Repository for the private catalog, always scoped to one company.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the company's active products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<Vec<CatalogProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM private_product
             WHERE company_id = $1 AND is_active
             ORDER BY created_at DESC"
        ))
        .bind(company_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get one active product, if it belongs to the company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get(
        &self,
        company_id: WholesaleCompanyId,
        id: PrivateProductId,
    ) -> Result<Option<CatalogProduct>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM private_product
             WHERE id = $1 AND company_id = $2 AND is_active"
        ))
        .bind(id.as_i32())
        .bind(company_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
