//! Integration tests for Cedarline.
//!
//! # Running Tests
//!
//! The end-to-end tests in `tests/` are `#[ignore]`d by default; they
//! need a migrated database and the three servers running:
//!
//! ```bash
//! cargo run -p cedarline-cli -- migrate run
//! cargo run -p cedarline-storefront &
//! cargo run -p cedarline-admin &
//! cargo run -p cedarline-wholesale &
//! cargo test -p cedarline-integration-tests -- --ignored
//! ```
//!
//! Domain-rule tests (status graphs, inspection tallies, role gates)
//! run without any infrastructure.

/// Base URL for the storefront API.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Base URL for the wholesale portal API.
#[must_use]
pub fn wholesale_base_url() -> String {
    std::env::var("WHOLESALE_BASE_URL").unwrap_or_else(|_| "http://localhost:3002".to_string())
}

/// A cookie-holding client for session-based APIs.
///
/// # Panics
///
/// Panics if the TLS backend fails to initialize.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for test isolation.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", uuid::Uuid::new_v4())
}
