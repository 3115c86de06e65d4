//! # Data Model
//!
//! Database-backed entities and repositories.

pub mod store;
