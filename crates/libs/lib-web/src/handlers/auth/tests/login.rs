use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::handlers::test_support::*;
use lib_core::dto::auth::AuthResponse;
use lib_core::dto::users::ErrorResponse;

#[tokio::test]
async fn test_login_with_email() {
    let pool = setup_test_db().await;
    let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
    let app = test_app(pool).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            json!({"email_or_username": "alice@example.com", "password": "SecurePass123!"}),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: AuthResponse = read_json(response).await;
    assert_eq!(body.user.id, alice.id);
    assert_eq!(body.user.username, "alice");
    assert!(!body.token.is_empty());
    assert_eq!(body.message, "Login successful");
}

#[tokio::test]
async fn test_login_with_username() {
    let pool = setup_test_db().await;
    seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
    let app = test_app(pool).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            json!({"email_or_username": "alice", "password": "SecurePass123!"}),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let pool = setup_test_db().await;
    seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
    let app = test_app(pool).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            json!({"email_or_username": "alice", "password": "WrongPass999!"}),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    assert_eq!(body.error, "Incorrect email or password");
}

#[tokio::test]
async fn test_login_unknown_user_same_message() {
    let pool = setup_test_db().await;
    let app = test_app(pool).await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            json!({"email_or_username": "ghost", "password": "SecurePass123!"}),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = read_json(response).await;
    // Indistinguishable from the wrong-password case
    assert_eq!(body.error, "Incorrect email or password");
}
