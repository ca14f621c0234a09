//! Wholesale login service.
//!
//! Verifies Argon2id password hashes created by the back office. There
//! is no self-registration; accounts are provisioned by admins.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;
use thiserror::Error;

use cedarline_core::Email;

use crate::db::RepositoryError;
use crate::db::users::{LoginCandidate, UserRepository};

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cedarline_core::EmailError),

    /// Email or password is wrong, or the account is deactivated.
    /// Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Authentication service for wholesale buyers.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Login with email and password.
    ///
    /// A deactivated user or company fails the same way a wrong
    /// password does.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown,
    /// the account is inactive, or the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginCandidate, AuthError> {
        let email = Email::parse(email)?;

        let candidate = self
            .users
            .get_active_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &candidate.password_hash)?;

        Ok(candidate)
    }
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
mod tests {
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    use super::*;

    #[test]
    fn test_verify_password_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"buyer passphrase 42", &salt)
            .expect("hashing succeeds")
            .to_string();

        assert!(verify_password("buyer passphrase 42", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
