//! Admin authentication service.
//!
//! Password login using Argon2id hashing, plus first-run bootstrap of
//! the initial super admin.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use cedarline_core::{AdminRole, Email};

use crate::db::RepositoryError;
use crate::db::admin_users::AdminUserRepository;
use crate::models::admin_user::AdminUser;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 12;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cedarline_core::EmailError),

    /// Password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Email is already registered.
    #[error("admin already exists")]
    AdminAlreadyExists,

    /// Email or password is wrong. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bootstrap attempted after an admin exists.
    #[error("instance already provisioned")]
    AlreadyProvisioned,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authentication service for back-office admins.
pub struct AuthService<'a> {
    admins: AdminUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown
    /// or the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email)?;

        let (admin, password_hash) = self
            .admins
            .get_by_email_with_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(admin)
    }

    /// Create the first super admin on an unprovisioned instance.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyProvisioned` if any admin exists.
    pub async fn bootstrap(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        if self.admins.count().await? > 0 {
            return Err(AuthError::AlreadyProvisioned);
        }

        self.create(email, name, password, AdminRole::SuperAdmin)
            .await
    }

    /// Create an admin user with the given role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AdminAlreadyExists` if the email is taken.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        password: &str,
        role: AdminRole,
    ) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(&email, name, &password_hash, role)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AdminAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(admin)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
pub(crate) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("elevenchars"),
            Err(AuthError::WeakPassword(_))
        ));
        assert!(validate_password("twelve chars!").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
