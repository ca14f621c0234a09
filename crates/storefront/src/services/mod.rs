//! Business logic services for the storefront.

pub mod auth;
pub mod email;
