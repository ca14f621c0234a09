//! Domain types for the storefront.

pub mod cart;
pub mod catalog;
pub mod inquiry;
pub mod order;
pub mod user;
