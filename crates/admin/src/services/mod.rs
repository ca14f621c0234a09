//! Back-office services: authentication, email, and object storage.

pub mod auth;
pub mod email;
pub mod storage;
