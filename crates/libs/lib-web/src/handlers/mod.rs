//! # Request Handlers
//!
//! HTTP request handlers grouped by resource.

// region: --- Modules
pub mod auth;
pub mod root;
pub mod todos;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
// endregion: --- Modules

use lib_auth::Claims;
use lib_core::model::store::models::User;
use lib_core::model::store::UserRepository;
use lib_core::{AppError, DbPool, Result};

use crate::middleware::mw_auth::CREDENTIALS_ERROR;

/// Resolve the claims from a validated token to a live user row.
///
/// A token for a user that has since been deleted is rejected with 401,
/// same as an invalid token.
pub(crate) async fn current_user(pool: &DbPool, claims: &Claims) -> Result<User> {
    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized(CREDENTIALS_ERROR.to_string()))?;

    UserRepository::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(CREDENTIALS_ERROR.to_string()))
}
