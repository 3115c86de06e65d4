//! # Authentication Handlers
//!
//! Login with email or username, and token refresh for already
//! authenticated callers.

use axum::extract::{Extension, State};
use axum::Json;
use tracing::{info, warn};

use lib_auth::{encode_jwt, verify_password, Claims};
use lib_core::dto::auth::{AuthResponse, LoginRequest};
use lib_core::model::store::UserRepository;
use lib_core::{AppError, Config, DbPool, Result};

use super::current_user;

#[cfg(test)]
mod tests;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

/// `POST /api/auth/login` - authenticate and receive a JWT.
///
/// The same 401 message is returned whether the account does not exist
/// or the password is wrong.
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(login_data): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    info!("[LOGIN] Attempt for: {}", login_data.email_or_username);

    let user = if login_data.email_or_username.contains('@') {
        UserRepository::find_by_email(&pool, &login_data.email_or_username).await?
    } else {
        UserRepository::find_by_username(&pool, &login_data.email_or_username).await?
    }
    .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    let valid = verify_password(&login_data.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !valid {
        warn!("[LOGIN] Wrong password for user id={}", user.id);
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let token = encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("[LOGIN] User id={} logged in", user.id);
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
        message: "Login successful".to_string(),
    }))
}

/// `POST /api/auth/refresh` - issue a fresh token for the caller.
///
/// The presented token must still be valid; refresh cannot resurrect an
/// expired session or a deleted account.
pub async fn refresh(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AuthResponse>> {
    let user = current_user(&pool, &claims).await?;

    let token = encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    info!("[REFRESH] Issued fresh token for user id={}", user.id);
    Ok(Json(AuthResponse {
        user: user.into(),
        token,
        message: "Token refreshed".to_string(),
    }))
}
