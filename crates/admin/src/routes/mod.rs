//! HTTP route handlers for the back-office JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! POST /setup                         - First-run super admin bootstrap
//!
//! # Auth
//! POST /auth/login                    - Login
//! POST /auth/logout                   - Logout
//! GET  /auth/me                       - Current admin
//!
//! GET  /dashboard                     - Headline counts
//!
//! # Admin users (super admin only)
//! GET    /admins                      - List admins
//! POST   /admins                      - Create an admin
//! PUT    /admins/{id}/role            - Change an admin's role
//! DELETE /admins/{id}                 - Delete an admin
//!
//! # Catalog
//! GET    /categories                  - List categories
//! POST   /categories                  - Create a category
//! PUT    /categories/{id}             - Update a category
//! DELETE /categories/{id}             - Delete a category (empty only)
//! GET    /categories/{id}/subcategories - List subcategories
//! POST   /categories/{id}/subcategories - Create a subcategory
//! DELETE /subcategories/{id}          - Delete a subcategory
//! GET    /products                    - List products, incl. inactive
//! POST   /products                    - Create a product
//! GET    /products/{id}               - Product detail
//! PUT    /products/{id}               - Update a product
//! PUT    /products/{id}/active        - Activate/deactivate
//!
//! # Retail orders
//! GET  /orders                        - List, ?status= filter
//! GET  /orders/{id}                   - Detail with items and history
//! POST /orders/{id}/status            - Guarded status transition
//! GET  /orders/{id}/financials        - Financial records
//! POST /orders/{id}/financials        - Record payment/refund/adjustment
//!
//! # Inquiries
//! GET  /inquiries                     - List threads, ?status= filter
//! GET  /inquiries/{id}                - Thread with messages
//! POST /inquiries/{id}/reply          - Send and record a reply
//! POST /inquiries/{id}/close          - Close a thread
//! POST /inquiries/{id}/reopen         - Reopen a thread
//!
//! # Wholesale
//! GET  /wholesale/companies           - List companies
//! POST /wholesale/companies           - Create a company
//! PUT  /wholesale/companies/{id}/active - Activate/deactivate
//! GET  /wholesale/companies/{id}/users  - List company logins
//! POST /wholesale/companies/{id}/users  - Create a login
//! PUT  /wholesale/users/{id}/active   - Activate/deactivate a login
//! GET  /wholesale/companies/{id}/products - List private products
//! POST /wholesale/companies/{id}/products - Create a private product
//! PUT  /wholesale/products/{id}       - Update price/MOQ/active
//! GET  /wholesale/orders              - List, ?status= filter
//! GET  /wholesale/orders/{id}         - Detail with items
//! POST /wholesale/orders/{id}/status  - Guarded transition; shipped gated
//!                                       on inspection approval
//! GET  /wholesale/orders/{id}/inspections - Per-item inspection rollup
//! GET  /wholesale/orders/{id}/financials  - Financial records
//! POST /wholesale/orders/{id}/financials  - Record payment/refund/adjustment
//!
//! # Inspections
//! GET  /wholesale/items/{id}/inspection   - Inspection with photos
//! POST /wholesale/items/{id}/inspection   - Create on first use
//! POST /inspections/{id}/photos           - Upload a photo (multipart)
//! POST /inspections/photos/{id}/review    - Approve or reject a photo
//! ```

pub mod admin_users;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod financials;
pub mod inquiries;
pub mod inspections;
pub mod orders;
pub mod products;
pub mod setup;
pub mod wholesale;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};

use crate::error::AppError;
use crate::models::admin_user::CurrentAdmin;
use crate::state::AppState;

/// Reject admins whose role cannot mutate store data.
pub(crate) fn require_write(admin: &CurrentAdmin) -> Result<(), AppError> {
    if admin.role.can_write() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "role does not permit writes".to_string(),
        ))
    }
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/setup", post(setup::bootstrap))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/dashboard", get(dashboard::show))
        .route("/admins", get(admin_users::index).post(admin_users::create))
        .route("/admins/{id}/role", put(admin_users::update_role))
        .route("/admins/{id}", delete(admin_users::remove))
        .route("/categories", get(categories::index).post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::remove),
        )
        .route(
            "/categories/{id}/subcategories",
            get(categories::subcategories).post(categories::create_subcategory),
        )
        .route("/subcategories/{id}", delete(categories::remove_subcategory))
        .route("/products", get(products::index).post(products::create))
        .route("/products/{id}", get(products::show).put(products::update))
        .route("/products/{id}/active", put(products::set_active))
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
        .route(
            "/orders/{id}/financials",
            get(financials::index_retail).post(financials::create_retail),
        )
        .route("/inquiries", get(inquiries::index))
        .route("/inquiries/{id}", get(inquiries::show))
        .route("/inquiries/{id}/reply", post(inquiries::reply))
        .route("/inquiries/{id}/close", post(inquiries::close))
        .route("/inquiries/{id}/reopen", post(inquiries::reopen))
        .route(
            "/wholesale/companies",
            get(wholesale::companies).post(wholesale::create_company),
        )
        .route(
            "/wholesale/companies/{id}/active",
            put(wholesale::set_company_active),
        )
        .route(
            "/wholesale/companies/{id}/users",
            get(wholesale::users).post(wholesale::create_user),
        )
        .route("/wholesale/users/{id}/active", put(wholesale::set_user_active))
        .route(
            "/wholesale/companies/{id}/products",
            get(wholesale::private_products).post(wholesale::create_private_product),
        )
        .route("/wholesale/products/{id}", put(wholesale::update_private_product))
        .route("/wholesale/orders", get(wholesale::orders))
        .route("/wholesale/orders/{id}", get(wholesale::show_order))
        .route(
            "/wholesale/orders/{id}/status",
            post(wholesale::update_order_status),
        )
        .route(
            "/wholesale/orders/{id}/inspections",
            get(inspections::order_summary),
        )
        .route(
            "/wholesale/orders/{id}/financials",
            get(financials::index_wholesale).post(financials::create_wholesale),
        )
        .route(
            "/wholesale/items/{id}/inspection",
            get(inspections::show).post(inspections::create),
        )
        .route(
            "/inspections/{id}/photos",
            post(inspections::upload_photo)
                .layer(DefaultBodyLimit::max(inspections::MAX_UPLOAD_BODY_BYTES)),
        )
        .route("/inspections/photos/{id}/review", post(inspections::review_photo))
}
