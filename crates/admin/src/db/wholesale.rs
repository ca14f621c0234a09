//! Wholesale management repository: companies, users, private
//! products, and wholesale orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use cedarline_core::{
    AdminUserId, Money, PrivateProductId, WholesaleCompanyId, WholesaleOrderId,
    WholesaleOrderItemId, WholesaleOrderStatus, WholesaleRole, WholesaleUserId,
};

use super::{RepositoryError, parse_money};
use crate::models::wholesale::{
    PrivateProduct, WholesaleCompany, WholesaleOrder, WholesaleOrderDetail, WholesaleOrderItem,
    WholesaleUser,
};

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i32,
    code: String,
    name: String,
    contact_email: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<CompanyRow> for WholesaleCompany {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: WholesaleCompanyId::new(row.id),
            code: row.code,
            name: row.name,
            contact_email: row.contact_email,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WholesaleUserRow {
    id: i32,
    company_id: i32,
    email: String,
    name: String,
    role: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<WholesaleUserRow> for WholesaleUser {
    type Error = RepositoryError;

    fn try_from(row: WholesaleUserRow) -> Result<Self, Self::Error> {
        let role: WholesaleRole = RepositoryError::parse_column(&row.role, "wholesale role")?;

        Ok(Self {
            id: WholesaleUserId::new(row.id),
            company_id: WholesaleCompanyId::new(row.company_id),
            email: row.email,
            name: row.name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PrivateProductRow {
    id: i32,
    company_id: i32,
    sku: String,
    name_en: String,
    name_zh: String,
    unit_price: Decimal,
    currency: String,
    moq: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<PrivateProductRow> for PrivateProduct {
    type Error = RepositoryError;

    fn try_from(row: PrivateProductRow) -> Result<Self, Self::Error> {
        let unit_price = parse_money(row.unit_price, &row.currency)?;

        Ok(Self {
            id: PrivateProductId::new(row.id),
            company_id: WholesaleCompanyId::new(row.company_id),
            sku: row.sku,
            name_en: row.name_en,
            name_zh: row.name_zh,
            unit_price,
            moq: row.moq,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WholesaleOrderRow {
    id: i32,
    company_id: i32,
    placed_by: i32,
    status: String,
    total: Decimal,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WholesaleOrderRow> for WholesaleOrder {
    type Error = RepositoryError;

    fn try_from(row: WholesaleOrderRow) -> Result<Self, Self::Error> {
        let status: WholesaleOrderStatus =
            RepositoryError::parse_column(&row.status, "wholesale order status")?;
        let total = parse_money(row.total, &row.currency)?;

        Ok(Self {
            id: WholesaleOrderId::new(row.id),
            company_id: WholesaleCompanyId::new(row.company_id),
            placed_by: WholesaleUserId::new(row.placed_by),
            status,
            total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WholesaleOrderItemRow {
    id: i32,
    private_product_id: i32,
    sku: String,
    name_en: String,
    unit_price: Decimal,
    currency: String,
    quantity: i32,
}

impl TryFrom<WholesaleOrderItemRow> for WholesaleOrderItem {
    type Error = RepositoryError;

    fn try_from(row: WholesaleOrderItemRow) -> Result<Self, Self::Error> {
        let unit_price = parse_money(row.unit_price, &row.currency)?;

        Ok(Self {
            id: WholesaleOrderItemId::new(row.id),
            private_product_id: PrivateProductId::new(row.private_product_id),
            sku: row.sku,
            name_en: row.name_en,
            unit_price,
            quantity: row.quantity,
        })
    }
}

const COMPANY_COLUMNS: &str = "id, code, name, contact_email, is_active, created_at";
const USER_COLUMNS: &str = "id, company_id, email, name, role, is_active, created_at";
const PRODUCT_COLUMNS: &str =
    "id, company_id, sku, name_en, name_zh, unit_price, currency, moq, is_active, created_at";
const ORDER_COLUMNS: &str =
    "id, company_id, placed_by, status, total, currency, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, private_product_id, sku, name_en, unit_price, currency, quantity";

/// Repository for back-office wholesale operations.
pub struct WholesaleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WholesaleRepository<'a> {
    /// Create a new wholesale repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Companies
    // =========================================================================

    /// List all companies.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_companies(&self) -> Result<Vec<WholesaleCompany>, RepositoryError> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM wholesale_company ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a company by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_company(
        &self,
        id: WholesaleCompanyId,
    ) -> Result<Option<WholesaleCompany>, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM wholesale_company WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is taken.
    pub async fn create_company(
        &self,
        code: &str,
        name: &str,
        contact_email: &str,
    ) -> Result<WholesaleCompany, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "INSERT INTO wholesale_company (code, name, contact_email) \
             VALUES ($1, $2, $3) RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(code)
        .bind(name)
        .bind(contact_email)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "company code already exists"))?;

        Ok(row.into())
    }

    /// Activate or deactivate a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the company doesn't exist.
    pub async fn set_company_active(
        &self,
        id: WholesaleCompanyId,
        is_active: bool,
    ) -> Result<WholesaleCompany, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "UPDATE wholesale_company SET is_active = $1 WHERE id = $2 \
             RETURNING {COMPANY_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    // =========================================================================
    // Wholesale users
    // =========================================================================

    /// List the logins of a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_users(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<Vec<WholesaleUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, WholesaleUserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM wholesale_user WHERE company_id = $1 ORDER BY name"
        ))
        .bind(company_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a login for a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    pub async fn create_user(
        &self,
        company_id: WholesaleCompanyId,
        email: &str,
        name: &str,
        password_hash: &str,
        role: WholesaleRole,
    ) -> Result<WholesaleUser, RepositoryError> {
        let row = sqlx::query_as::<_, WholesaleUserRow>(&format!(
            "INSERT INTO wholesale_user (company_id, email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        ))
        .bind(company_id.as_i32())
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists"))?;

        row.try_into()
    }

    /// Activate or deactivate a login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_user_active(
        &self,
        id: WholesaleUserId,
        is_active: bool,
    ) -> Result<WholesaleUser, RepositoryError> {
        let row = sqlx::query_as::<_, WholesaleUserRow>(&format!(
            "UPDATE wholesale_user SET is_active = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    // =========================================================================
    // Private products
    // =========================================================================

    /// List a company's private products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_private_products(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<Vec<PrivateProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, PrivateProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM private_product \
             WHERE company_id = $1 ORDER BY sku"
        ))
        .bind(company_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Create a private product for a company.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the SKU is taken.
    pub async fn create_private_product(
        &self,
        company_id: WholesaleCompanyId,
        sku: &str,
        name_en: &str,
        name_zh: &str,
        unit_price: Money,
        moq: i32,
    ) -> Result<PrivateProduct, RepositoryError> {
        let row = sqlx::query_as::<_, PrivateProductRow>(&format!(
            "INSERT INTO private_product \
             (company_id, sku, name_en, name_zh, unit_price, currency, moq) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(company_id.as_i32())
        .bind(sku)
        .bind(name_en)
        .bind(name_zh)
        .bind(unit_price.amount)
        .bind(unit_price.currency.as_str())
        .bind(moq)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "sku already exists"))?;

        row.try_into()
    }

    /// Update a private product's price, MOQ, and active flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update_private_product(
        &self,
        id: PrivateProductId,
        unit_price: Money,
        moq: i32,
        is_active: bool,
    ) -> Result<PrivateProduct, RepositoryError> {
        let row = sqlx::query_as::<_, PrivateProductRow>(&format!(
            "UPDATE private_product \
             SET unit_price = $1, currency = $2, moq = $3, is_active = $4 \
             WHERE id = $5 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(unit_price.amount)
        .bind(unit_price.currency.as_str())
        .bind(moq)
        .bind(is_active)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    // =========================================================================
    // Wholesale orders
    // =========================================================================

    /// List wholesale orders, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn list_orders(
        &self,
        status: Option<WholesaleOrderStatus>,
    ) -> Result<Vec<WholesaleOrder>, RepositoryError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, WholesaleOrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM wholesale_order \
                     WHERE status = $1 ORDER BY created_at DESC"
                ))
                .bind(status.to_string())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, WholesaleOrderRow>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM wholesale_order ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a wholesale order with its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_order_detail(
        &self,
        id: WholesaleOrderId,
    ) -> Result<Option<WholesaleOrderDetail>, RepositoryError> {
        let row = sqlx::query_as::<_, WholesaleOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM wholesale_order WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, WholesaleOrderItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM wholesale_order_item \
             WHERE wholesale_order_id = $1 ORDER BY id"
        ))
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<WholesaleOrderItem>, _>>()?;

        Ok(Some(WholesaleOrderDetail {
            order: row.try_into()?,
            items,
        }))
    }

    /// Move a wholesale order between statuses, recording the audit row.
    ///
    /// Guarded the same way as retail status updates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is no longer in
    /// `from` status.
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn update_order_status(
        &self,
        id: WholesaleOrderId,
        from: WholesaleOrderStatus,
        to: WholesaleOrderStatus,
        changed_by: AdminUserId,
        note: Option<&str>,
    ) -> Result<WholesaleOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated: Option<i32> = sqlx::query_scalar(
            "UPDATE wholesale_order SET status = $1, updated_at = now() \
             WHERE id = $2 AND status = $3 RETURNING id",
        )
        .bind(to.to_string())
        .bind(id.as_i32())
        .bind(from.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            let exists: Option<i32> =
                sqlx::query_scalar("SELECT id FROM wholesale_order WHERE id = $1")
                    .bind(id.as_i32())
                    .fetch_optional(&mut *tx)
                    .await?;
            return Err(match exists {
                Some(_) => RepositoryError::Conflict(format!("order is no longer {from}")),
                None => RepositoryError::NotFound,
            });
        }

        sqlx::query(
            "INSERT INTO order_status_history \
             (wholesale_order_id, from_status, to_status, changed_by, note) \
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

        let row = sqlx::query_as::<_, WholesaleOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM wholesale_order WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
