//! Session middleware configuration.
//!
//! The back office keeps its own session table and a stricter cookie
//! policy than the storefront: Strict same-site and a 24 hour window.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cedarline_admin_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The `admin_session` table must already exist (created via migration).
///
/// # Errors
///
/// Returns an error if the table name is rejected by the store.
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<SessionManagerLayer<PostgresStore>, String> {
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("public")?
        .with_table_name("admin_session")?;

    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/"))
}
