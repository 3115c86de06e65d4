//! # User Handlers
//!
//! Account creation is public; listing requires a token; update and
//! delete are allowed only on the caller's own account.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use lib_auth::{hash_password, AuthError, Claims};
use lib_core::dto::users::{Message, PageFilter, UserCreateRequest, UserList, UserPublic};
use lib_core::model::store::models::{UserForCreate, UserForUpdate};
use lib_core::model::store::UserRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validation::{validate_email, validate_username};

use super::current_user;

fn validate_user_request(user_data: &UserCreateRequest) -> Result<()> {
    validate_username(&user_data.username).map_err(AppError::InvalidInput)?;
    validate_email(&user_data.email).map_err(AppError::InvalidInput)?;
    Ok(())
}

fn hash_or_reject(password: &str) -> Result<String> {
    match hash_password(password) {
        Ok(hash) => Ok(hash),
        Err(e @ AuthError::PasswordTooShort(_)) => Err(AppError::InvalidInput(e.to_string())),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}

/// `POST /api/users` - create a new account.
pub async fn create_user(
    State(pool): State<DbPool>,
    Json(user_data): Json<UserCreateRequest>,
) -> Result<(StatusCode, Json<UserPublic>)> {
    info!("[USERS] Creating user: {}", user_data.username);

    validate_user_request(&user_data)?;

    if UserRepository::find_by_username(&pool, &user_data.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if UserRepository::find_by_email(&pool, &user_data.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let password_hash = hash_or_reject(&user_data.password)?;

    let user = UserRepository::create(
        &pool,
        UserForCreate::new(user_data.username, user_data.email, password_hash),
    )
    .await?;

    info!("[USERS] Created user id={}", user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/users` - paginated user listing.
pub async fn list_users(
    State(pool): State<DbPool>,
    Query(page): Query<PageFilter>,
) -> Result<Json<UserList>> {
    let users = UserRepository::list(&pool, page.limit, page.offset).await?;

    Ok(Json(UserList {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// `GET /api/users/{user_id}` - public profile lookup.
pub async fn get_user(
    State(pool): State<DbPool>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserPublic>> {
    let user = UserRepository::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// `PUT /api/users/{user_id}` - replace the caller's own account data.
pub async fn update_user(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
    Json(user_data): Json<UserCreateRequest>,
) -> Result<Json<UserPublic>> {
    let current = current_user(&pool, &claims).await?;
    if current.id != user_id {
        return Err(AppError::Forbidden("Not enough permissions".to_string()));
    }

    validate_user_request(&user_data)?;
    let password_hash = hash_or_reject(&user_data.password)?;

    // A clashing username/email surfaces as a unique violation and maps
    // to 409 in From<sqlx::Error>.
    let updated = UserRepository::update(
        &pool,
        user_id,
        UserForUpdate::new()
            .username(user_data.username)
            .email(user_data.email)
            .password_hash(password_hash),
    )
    .await?;

    info!("[USERS] Updated user id={}", user_id);
    Ok(Json(updated.into()))
}

/// `DELETE /api/users/{user_id}` - delete the caller's own account.
pub async fn delete_user(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<Json<Message>> {
    let current = current_user(&pool, &claims).await?;
    if current.id != user_id {
        return Err(AppError::Forbidden("Not enough permissions".to_string()));
    }

    UserRepository::delete(&pool, user_id).await?;

    info!("[USERS] Deleted user id={}", user_id);
    Ok(Json(Message {
        message: "User deleted".to_string(),
    }))
}
