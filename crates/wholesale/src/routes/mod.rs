//! HTTP route handlers for the wholesale portal JSON API.
//!
//! Everything except `/auth/login` requires a bearer token; the token's
//! company ID scopes every query.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                - Liveness check
//! GET  /health/ready          - Readiness check (database ping)
//!
//! # Auth (strict rate limit)
//! POST /auth/login            - Login, returns a 12h bearer token
//! GET  /auth/me               - Current user per their token
//!
//! # Catalog
//! GET  /catalog               - Company's active private products
//! GET  /catalog/{id}          - One product
//!
//! # Orders
//! POST /orders                - Place an order (owner or buyer role)
//! GET  /orders                - Company's order history
//! GET  /orders/{id}           - Order detail with inspection tallies
//!
//! # Company
//! GET  /company               - Company profile
//! GET  /company/users         - Account members (owner role)
//! ```

pub mod auth;
pub mod catalog;
pub mod company;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::rate_limit::auth_rate_limiter;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login).layer(auth_rate_limiter()))
        .route("/me", get(auth::me))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/{id}", get(catalog::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place).get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the company routes router.
pub fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(company::profile))
        .route("/users", get(company::members))
}

/// Create all routes for the wholesale portal.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/catalog", catalog_routes())
        .nest("/orders", order_routes())
        .nest("/company", company_routes())
}
