//! # Core Library
//!
//! Configuration, error handling, data transfer objects, and the database
//! store for the application.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool};
