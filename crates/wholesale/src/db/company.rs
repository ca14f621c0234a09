//! Company profile repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedarline_core::{WholesaleCompanyId, WholesaleUserId};

use super::RepositoryError;
use crate::models::company::{CompanyMember, CompanyProfile};

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i32,
    code: String,
    name: String,
    contact_email: String,
    created_at: DateTime<Utc>,
}

impl From<CompanyRow> for CompanyProfile {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: WholesaleCompanyId::new(row.id),
            code: row.code,
            name: row.name,
            contact_email: row.contact_email,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i32,
    email: String,
    name: String,
    role: String,
    is_active: bool,
}

impl TryFrom<MemberRow> for CompanyMember {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: WholesaleUserId::new(row.id),
            email: row.email,
            name: row.name,
            role: RepositoryError::parse_column(&row.role, "wholesale_user.role")?,
            is_active: row.is_active,
        })
    }
}

/// Repository for the authenticated company's own profile.
pub struct CompanyRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompanyRepository<'a> {
    /// Create a new company repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the company's profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the company has been
    /// deactivated since the token was issued.
    pub async fn get_profile(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<CompanyProfile, RepositoryError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            "SELECT id, code, name, contact_email, created_at
             FROM wholesale_company
             WHERE id = $1 AND is_active",
        )
        .bind(company_id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// List everyone on the company account, including deactivated logins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_members(
        &self,
        company_id: WholesaleCompanyId,
    ) -> Result<Vec<CompanyMember>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            "SELECT id, email, name, role, is_active
             FROM wholesale_user
             WHERE company_id = $1
             ORDER BY created_at",
        )
        .bind(company_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
