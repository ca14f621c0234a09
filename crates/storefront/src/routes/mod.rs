//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database ping)
//!
//! # Auth (strict rate limit)
//! POST /auth/register               - Create an account
//! POST /auth/login                  - Login
//! POST /auth/logout                 - Logout
//! GET  /auth/me                     - Current customer
//!
//! # Catalog
//! GET  /categories                  - Category listing (cached)
//! GET  /categories/{id}/subcategories - Subcategories of a category
//! GET  /products                    - Active products; ?category=, ?subcategory=,
//!                                     ?q= name search, ?page=, ?per_page=
//! GET  /products/{slug}             - Product detail
//!
//! # Cart (requires auth)
//! GET    /cart                      - Current cart with items
//! POST   /cart/items                - Add a product
//! PUT    /cart/items/{id}           - Set quantity
//! DELETE /cart/items/{id}           - Remove item
//!
//! # Orders (requires auth)
//! POST /orders                      - Checkout the cart
//! GET  /orders                      - Order history
//! GET  /orders/{id}                 - Order detail with items
//! POST /orders/{id}/cancel          - Cancel a pending order
//!
//! # Inquiries
//! GET  /contact                     - Active inquiry forms
//! GET  /contact/{slug}              - Form metadata
//! POST /contact/{slug}              - Submit an inquiry
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod contact;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::rate_limit::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(auth_rate_limiter())
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::index))
        .route(
            "/categories/{id}/subcategories",
            get(categories::subcategories),
        )
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add_item))
        .route("/items/{id}", put(cart::update_item).delete(cart::remove_item))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::checkout).get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::cancel))
}

/// Create the inquiry routes router.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::index))
        .route("/{slug}", get(contact::show_form).post(contact::submit))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
        .nest("/contact", contact_routes())
        .layer(api_rate_limiter())
        .nest("/auth", auth_routes())
}
