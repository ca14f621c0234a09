//! Financial record repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{
    AdminUserId, FinancialKind, FinancialRecordId, Money, OrderId, WholesaleOrderId,
};

use super::{RepositoryError, parse_money};
use crate::models::financial::FinancialRecord;

#[derive(Debug, sqlx::FromRow)]
struct RecordRow {
    id: i32,
    order_id: Option<i32>,
    wholesale_order_id: Option<i32>,
    kind: String,
    amount: Decimal,
    currency: String,
    note: String,
    recorded_by: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecordRow> for FinancialRecord {
    type Error = RepositoryError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let kind: FinancialKind = RepositoryError::parse_column(&row.kind, "financial kind")?;
        let amount = parse_money(row.amount, &row.currency)?;

        Ok(Self {
            id: FinancialRecordId::new(row.id),
            order_id: row.order_id.map(OrderId::new),
            wholesale_order_id: row.wholesale_order_id.map(WholesaleOrderId::new),
            kind,
            amount,
            note: row.note,
            recorded_by: AdminUserId::new(row.recorded_by),
            created_at: row.created_at,
        })
    }
}

const COLUMNS: &str =
    "id, order_id, wholesale_order_id, kind, amount, currency, note, recorded_by, created_at";

/// Which order a financial record is attached to.
#[derive(Debug, Clone, Copy)]
pub enum FinancialTarget {
    Retail(OrderId),
    Wholesale(WholesaleOrderId),
}

/// Repository for payments, refunds, and adjustments.
pub struct FinancialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FinancialRepository<'a> {
    /// Create a new financial repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the records attached to one order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_for(
        &self,
        target: FinancialTarget,
    ) -> Result<Vec<FinancialRecord>, RepositoryError> {
        let (column, id) = match target {
            FinancialTarget::Retail(id) => ("order_id", id.as_i32()),
            FinancialTarget::Wholesale(id) => ("wholesale_order_id", id.as_i32()),
        };

        let rows = sqlx::query_as::<_, RecordRow>(&format!(
            "SELECT {COLUMNS} FROM financial_record WHERE {column} = $1 ORDER BY created_at"
        ))
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Record a payment, refund, or adjustment against an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn create(
        &self,
        target: FinancialTarget,
        kind: FinancialKind,
        amount: Money,
        note: &str,
        recorded_by: AdminUserId,
    ) -> Result<FinancialRecord, RepositoryError> {
        let (column, id) = match target {
            FinancialTarget::Retail(id) => ("order_id", id.as_i32()),
            FinancialTarget::Wholesale(id) => ("wholesale_order_id", id.as_i32()),
        };

        let row = sqlx::query_as::<_, RecordRow>(&format!(
            "INSERT INTO financial_record ({column}, kind, amount, currency, note, recorded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(kind.to_string())
        .bind(amount.amount)
        .bind(amount.currency.as_str())
        .bind(note)
        .bind(recorded_by.as_i32())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::NotFound
            }
            _ => RepositoryError::Database(e),
        })?;

        row.try_into()
    }
}
