//! Bearer token issuing and validation.
//!
//! HS256 tokens carrying the wholesale user, their company, and their
//! role. Tokens live for 12 hours; there is no refresh flow, buyers log
//! in again.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use cedarline_core::{WholesaleCompanyId, WholesaleRole, WholesaleUserId};

/// Token lifetime in seconds (12 hours).
const TOKEN_LIFETIME_SECS: i64 = 12 * 60 * 60;

/// Errors from token handling.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token could not be created.
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Token is missing, malformed, expired, or badly signed.
    #[error("invalid token")]
    Invalid,
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (wholesale user ID)
    pub sub: String,

    /// Company the user belongs to
    pub company_id: i32,

    /// Role within the company
    pub role: WholesaleRole,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    /// The user ID from the subject claim.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Invalid` if the subject is not an integer.
    pub fn user_id(&self) -> Result<WholesaleUserId, JwtError> {
        self.sub
            .parse::<i32>()
            .map(WholesaleUserId::new)
            .map_err(|_| JwtError::Invalid)
    }

    /// The company ID claim.
    #[must_use]
    pub const fn company_id(&self) -> WholesaleCompanyId {
        WholesaleCompanyId::new(self.company_id)
    }
}

/// JWT token manager.
pub struct JwtManager {
    secret: SecretString,
}

impl JwtManager {
    /// Create a new JWT manager.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a token for a wholesale user.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Sign` if signing fails.
    pub fn issue(
        &self,
        user_id: WholesaleUserId,
        company_id: WholesaleCompanyId,
        role: WholesaleRole,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(TOKEN_LIFETIME_SECS);

        let claims = Claims {
            sub: user_id.as_i32().to_string(),
            company_id: company_id.as_i32(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(JwtError::Sign)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Invalid` for expired, malformed, or
    /// badly-signed tokens.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &validation,
        )
        .map_err(|_| JwtError::Invalid)?;

        Ok(token_data.claims)
    }
}

/// Extract the bearer token from an Authorization header value.
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manager() -> JwtManager {
        JwtManager::new(SecretString::from("0f8ZkT2mWq9xJ4vB7nC1pL6sD3gH5aEy"))
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let m = manager();
        let token = m
            .issue(
                WholesaleUserId::new(42),
                WholesaleCompanyId::new(7),
                WholesaleRole::Buyer,
            )
            .unwrap();

        let claims = m.validate(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), WholesaleUserId::new(42));
        assert_eq!(claims.company_id(), WholesaleCompanyId::new(7));
        assert_eq!(claims.role, WholesaleRole::Buyer);
        assert!(claims.exp - claims.iat == TOKEN_LIFETIME_SECS);
    }

    #[test]
    fn test_validate_rejects_other_secret() {
        let token = manager()
            .issue(
                WholesaleUserId::new(1),
                WholesaleCompanyId::new(1),
                WholesaleRole::Owner,
            )
            .unwrap();

        let other = JwtManager::new(SecretString::from("q1W2e3R4t5Y6u7I8o9P0aSdFgHjKlZxC"));
        assert!(matches!(other.validate(&token), Err(JwtError::Invalid)));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(matches!(
            manager().validate("not-a-jwt"),
            Err(JwtError::Invalid)
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
    }
}
