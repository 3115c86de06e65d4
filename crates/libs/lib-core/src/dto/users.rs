//! # User Data Transfer Objects
//!
//! Request and response structures for the user endpoints.

use serde::{Deserialize, Serialize};

use crate::model::store::models::User;
use lib_utils::time::format_time;

/// Request body for creating a user (`POST /api/users`) or fully
/// replacing one (`PUT /api/users/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public user representation. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: format_time(user.created_at),
        }
    }
}

/// Response body for `GET /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserList {
    pub users: Vec<UserPublic>,
}

/// Pagination parameters for list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PageFilter {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

impl Default for PageFilter {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: default_limit(),
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// Standard error body, `{"error": ..., "code": ...}`.
///
/// Produced by `AppError::into_response`; declared here so clients and
/// tests can deserialize it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
