//! Request middleware: bearer-token auth and rate limiting.

pub mod auth;
pub mod rate_limit;
