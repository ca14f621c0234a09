//! Bearer-token authentication extractor.
//!
//! Every portal route except login takes [`CurrentWholesaleUser`], which
//! decodes the `Authorization: Bearer` header against the configured
//! HS256 secret. Company scoping flows from the claims, never from the
//! request body.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use cedarline_core::{WholesaleCompanyId, WholesaleRole, WholesaleUserId};

use crate::error::AppError;
use crate::services::jwt::extract_bearer_token;
use crate::state::AppState;

/// The authenticated wholesale user, as asserted by their token.
#[derive(Debug, Clone)]
pub struct CurrentWholesaleUser {
    pub user_id: WholesaleUserId,
    pub company_id: WholesaleCompanyId,
    pub role: WholesaleRole,
}

impl FromRequestParts<AppState> for CurrentWholesaleUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

        let token = extract_bearer_token(header)
            .ok_or_else(|| AppError::Unauthorized("expected a bearer token".to_string()))?;

        let claims = state.jwt().validate(token)?;

        Ok(Self {
            user_id: claims.user_id()?,
            company_id: claims.company_id(),
            role: claims.role,
        })
    }
}
