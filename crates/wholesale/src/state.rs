//! Shared application state for the wholesale portal.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::WholesaleConfig;
use crate::services::jwt::JwtManager;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WholesaleConfig,
    pool: PgPool,
    jwt: JwtManager,
}

impl AppState {
    /// Build the state from loaded configuration and a database pool.
    #[must_use]
    pub fn new(config: WholesaleConfig, pool: PgPool) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone());
        Self {
            inner: Arc::new(AppStateInner { config, pool, jwt }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &WholesaleConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn jwt(&self) -> &JwtManager {
        &self.inner.jwt
    }
}
