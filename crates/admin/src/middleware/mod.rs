//! HTTP middleware: sessions and authentication extractors.

pub mod auth;
pub mod session;
