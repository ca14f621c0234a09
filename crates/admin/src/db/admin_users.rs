//! Admin user repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use cedarline_core::{AdminRole, AdminUserId, Email};

use super::RepositoryError;
use crate::models::admin_user::AdminUser;

#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: AdminRole = RepositoryError::parse_column(&row.role, "admin role")?;

        Ok(Self {
            id: AdminUserId::new(row.id),
            email,
            name: row.name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const COLUMNS: &str = "id, email, name, role, created_at, updated_at";

/// Repository for admin user database operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count all admin users. Zero means the instance is unprovisioned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// List all admin users.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(&format!(
            "SELECT {COLUMNS} FROM admin_user ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an admin user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "SELECT {COLUMNS} FROM admin_user WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an admin user and their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email_with_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct WithHash {
            id: i32,
            email: String,
            name: String,
            role: String,
            password_hash: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, WithHash>(
            "SELECT id, email, name, role, password_hash, created_at, updated_at \
             FROM admin_user WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| {
            let hash = r.password_hash.clone();
            let user = AdminUserRow {
                id: r.id,
                email: r.email,
                name: r.name,
                role: r.role,
                created_at: r.created_at,
                updated_at: r.updated_at,
            }
            .try_into()?;
            Ok((user, hash))
        })
        .transpose()
    }

    /// Create a new admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "INSERT INTO admin_user (email, name, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(name)
        .bind(password_hash)
        .bind(role.to_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "email already exists"))?;

        row.try_into()
    }

    /// Update an admin user's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_role(
        &self,
        id: AdminUserId,
        role: AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "UPDATE admin_user SET role = $1, updated_at = now() \
             WHERE id = $2 RETURNING {COLUMNS}"
        ))
        .bind(role.to_string())
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete an admin user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM admin_user WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Count admin users with a given role.
    ///
    /// Used to stop the last super admin from being demoted or deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_role(&self, role: AdminRole) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_user WHERE role = $1")
            .bind(role.to_string())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
