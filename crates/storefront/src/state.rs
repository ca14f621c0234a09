//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::catalog::Category;
use crate::services::email::{EmailError, EmailService};

/// How long cached catalog listings stay fresh.
const CATALOG_CACHE_TTL: Duration = Duration::from_secs(60);

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    email: EmailService,
    category_cache: Cache<(), Arc<Vec<Category>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be built.
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Result<Self, EmailError> {
        let email = EmailService::new(&config.email)?;
        let category_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATALOG_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                email,
                category_cache,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the email service.
    #[must_use]
    pub fn email(&self) -> &EmailService {
        &self.inner.email
    }

    /// Get a reference to the category listing cache.
    #[must_use]
    pub fn category_cache(&self) -> &Cache<(), Arc<Vec<Category>>> {
        &self.inner.category_cache
    }
}
