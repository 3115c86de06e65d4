//! # JWT Token Management
//!
//! JWT token generation and validation (HS256).

use chrono::Duration;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::time::now_utc;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Encode a JWT token with user claims.
pub fn encode_jwt(
    user_id: i64,
    username: String,
    secret: &str,
    expiration_hours: i64,
) -> Result<String, AuthError> {
    let now = now_utc();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        username,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AuthError::TokenDecode(e.to_string()))?;

    Ok(token_data.claims)
}
