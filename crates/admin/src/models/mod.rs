//! Domain types for the admin panel.

pub mod admin_user;
pub mod catalog;
pub mod dashboard;
pub mod financial;
pub mod inquiry;
pub mod inspection;
pub mod order;
pub mod wholesale;
