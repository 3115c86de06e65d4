//! # Authentication Middleware
//!
//! Axum middleware for JWT token validation.
//!
//! Extracts the `Authorization: Bearer <token>` header, validates the
//! token, and injects the authenticated user's [`Claims`](lib_auth::Claims)
//! into the request extensions. Handlers behind this middleware read them
//! with `Extension<Claims>`.

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::config::core_config;
use lib_core::AppError;
use tracing::{debug, warn};

/// The 401 message sent for every authentication failure.
///
/// Deliberately identical for the missing-header, malformed-header, and
/// bad-token cases so the response does not reveal which check failed.
pub const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// Authentication middleware that validates JWT tokens.
///
/// # Behavior
///
/// - **Valid token**: continues to the handler with `Claims` in extensions
/// - **Missing/invalid token**: returns `401 Unauthorized`
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized(CREDENTIALS_ERROR.to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("[AUTH] Authorization header is not a bearer token");
        AppError::Unauthorized(CREDENTIALS_ERROR.to_string())
    })?;

    let config = core_config();
    let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::Unauthorized(CREDENTIALS_ERROR.to_string())
    })?;

    debug!(
        "[AUTH] Authenticated user: {} (id: {})",
        claims.username, claims.sub
    );

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
