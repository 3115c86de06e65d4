//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! - `POST /api/auth/login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/refresh` - (bearer token) -> [`AuthResponse`]
//!
//! The `token` field of [`AuthResponse`] goes into subsequent requests as
//! `Authorization: Bearer <token>`.

use serde::{Deserialize, Serialize};

use super::users::UserPublic;

/// Login request with email or username.
///
/// `email_or_username` accepts either form; anything containing `@` is
/// looked up as an email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

/// Authentication response returned on successful login or token refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: UserPublic,
    pub token: String,
    pub message: String,
}
