//! Cedarline Core - Shared types library.
//!
//! This crate provides common types used across all Cedarline components:
//! - `storefront` - Public-facing retail site API
//! - `admin` - Internal back-office panel
//! - `wholesale` - B2B portal for registered companies
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`inspection`] - Inspection-photo review tally and shipping-readiness checks

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod inspection;
pub mod types;

pub use types::*;
