//! # Authentication Library
//!
//! Password hashing and JWT token management.

pub mod pwd;
pub mod token;

use thiserror::Error;

/// Errors produced by the password and token modules.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Failed to hash password: {0}")]
    HashFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    InvalidHashFormat(String),

    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    #[error("Failed to decode JWT: {0}")]
    TokenDecode(String),
}

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{decode_jwt, encode_jwt, Claims};
