//! HTTP middleware for the storefront.

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use session::create_session_layer;
