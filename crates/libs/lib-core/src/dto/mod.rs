//! # Data Transfer Objects (DTOs)
//!
//! Request and response structures for the REST API. All DTOs use
//! snake_case field names in JSON (default serde behavior).

pub mod auth;
pub mod todos;
pub mod users;

pub use auth::*;
pub use todos::*;
pub use users::*;
