//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin user with a generated password
//! cedarline-cli admin create -e admin@example.com -n "Admin Name" -r super_admin
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use uuid::Uuid;

use cedarline_core::{AdminRole, Email};

use super::{CommandError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: super_admin, admin, viewer")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// User already exists.
    #[error("Admin user already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// Shared command failure.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<sqlx::Error> for AdminError {
    fn from(e: sqlx::Error) -> Self {
        Self::Command(CommandError::Database(e))
    }
}

/// Create a new admin user.
///
/// When no password is given, a random one is generated and logged so
/// the operator can hand it over for a first login.
///
/// # Errors
///
/// Returns `AdminError` for bad input, a duplicate email, or database
/// failures.
pub async fn create_user(
    email: &str,
    name: &str,
    role: &str,
    password: Option<&str>,
) -> Result<i32, AdminError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|e| AdminError::InvalidEmail(e.to_string()))?;

    let generated = password.is_none();
    let password = password
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AdminError::PasswordHash)?
        .to_string();

    let pool = connect().await?;

    tracing::info!("Creating admin user: {} ({})", email, role);

    let existing: Option<i32> =
        sqlx::query_scalar("SELECT id FROM admin_user WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&pool)
            .await?;

    if existing.is_some() {
        return Err(AdminError::UserExists(email.as_str().to_owned()));
    }

    let user_id: i32 = sqlx::query_scalar(
        "INSERT INTO admin_user (email, name, password_hash, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(email.as_str())
    .bind(name)
    .bind(&password_hash)
    .bind(role.to_string())
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}, Role: {}",
        user_id,
        email,
        role
    );
    if generated {
        tracing::info!("Generated password (share securely, then rotate): {password}");
    }

    Ok(user_id)
}
