//! Domain types for the wholesale portal.

pub mod catalog;
pub mod company;
pub mod order;
