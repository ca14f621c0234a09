//! Wholesale login lookups.

use sqlx::PgPool;

use cedarline_core::{Email, WholesaleCompanyId, WholesaleRole, WholesaleUserId};

use super::RepositoryError;

/// The credential row needed to authenticate a login attempt.
#[derive(Debug)]
pub struct LoginCandidate {
    pub user_id: WholesaleUserId,
    pub company_id: WholesaleCompanyId,
    pub name: String,
    pub role: WholesaleRole,
    pub password_hash: String,
}

#[derive(Debug, sqlx::FromRow)]
struct LoginRow {
    id: i32,
    company_id: i32,
    name: String,
    role: String,
    password_hash: String,
}

impl TryFrom<LoginRow> for LoginCandidate {
    type Error = RepositoryError;

    fn try_from(row: LoginRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: WholesaleUserId::new(row.id),
            company_id: WholesaleCompanyId::new(row.company_id),
            name: row.name,
            role: RepositoryError::parse_column(&row.role, "wholesale_user.role")?,
            password_hash: row.password_hash,
        })
    }
}

/// Repository for wholesale logins.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find an active user on an active company by email, for login.
    ///
    /// A deactivated user or a deactivated company both make the email
    /// unknown; the caller cannot tell the difference.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<LoginCandidate>, RepositoryError> {
        let row = sqlx::query_as::<_, LoginRow>(
            r"
            SELECT u.id, u.company_id, u.name, u.role, u.password_hash
            FROM wholesale_user u
            JOIN wholesale_company c ON c.id = u.company_id
            WHERE u.email = $1 AND u.is_active AND c.is_active
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}
