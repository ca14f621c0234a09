//! Portal services: JWT issuing/validation and password login.

pub mod auth;
pub mod jwt;
