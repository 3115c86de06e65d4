//! Shared helpers for handler tests: in-memory database, router
//! construction, and request building.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqlitePoolOptions;

use lib_auth::{encode_jwt, hash_password};
use lib_core::config::init_config_from;
use lib_core::model::store::models::{User, UserForCreate};
use lib_core::model::store::UserRepository;
use lib_core::{Config, DbPool};

use crate::server::{create_router, AppState};

pub const TEST_JWT_SECRET: &str = "test-secret-key-must-be-at-least-32-chars!";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 24,
    }
}

/// Install the test config as the process-global one.
///
/// Every test passes identical values, so whichever call wins the race
/// leaves the same state; later calls are ignored.
pub fn init_test_config() {
    let _ = init_config_from(test_config());
}

/// In-memory pool with the same schema the migration scripts produce.
///
/// Single connection: every `sqlite::memory:` connection is its own
/// database, so the pool must never open a second one.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("test pool should connect");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("foreign keys pragma should apply");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("users table should be creatable");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            state TEXT NOT NULL DEFAULT 'todo',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("todos table should be creatable");

    pool
}

/// Full application router over the given pool.
pub async fn test_app(pool: DbPool) -> Router {
    init_test_config();

    let state = AppState {
        db: pool,
        config: test_config(),
    };

    create_router(state, vec!["http://localhost:3000".to_string()])
}

/// Insert a user directly, bypassing the HTTP layer.
pub async fn seed_user(pool: &DbPool, username: &str, email: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("hashing should succeed");

    UserRepository::create(
        pool,
        UserForCreate::new(username.to_string(), email.to_string(), password_hash),
    )
    .await
    .expect("seed user should succeed")
}

/// `Authorization` header value for a seeded user.
pub fn bearer_for(user: &User) -> String {
    let token = encode_jwt(user.id, user.username.clone(), TEST_JWT_SECRET, 24)
        .expect("token encoding should succeed");
    format!("Bearer {token}")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn authed_request(method: Method, uri: &str, bearer: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer)
        .body(Body::empty())
        .expect("request should build")
}

pub fn authed_json_request(
    method: Method,
    uri: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

/// Deserialize a response body as JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
