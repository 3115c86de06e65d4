//! # Todo Handlers
//!
//! Every endpoint here requires a token and operates on the caller's own
//! tasks; another user's todo id behaves exactly like a nonexistent one.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use lib_auth::Claims;
use lib_core::dto::todos::{
    TodoCreateRequest, TodoFilterQuery, TodoList, TodoPublic, TodoUpdateRequest,
};
use lib_core::dto::users::Message;
use lib_core::model::store::models::{TodoFilter, TodoForCreate, TodoForUpdate};
use lib_core::model::store::TodoRepository;
use lib_core::{AppError, DbPool, Result};
use lib_utils::validation::validate_not_empty;

use super::current_user;

const TASK_NOT_FOUND: &str = "Task not found.";

/// `POST /api/todos` - create a task for the caller.
pub async fn create_todo(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(todo_data): Json<TodoCreateRequest>,
) -> Result<(StatusCode, Json<TodoPublic>)> {
    let user = current_user(&pool, &claims).await?;

    validate_not_empty(&todo_data.title, "title").map_err(AppError::InvalidInput)?;

    let todo = TodoRepository::create(
        &pool,
        user.id,
        TodoForCreate {
            title: todo_data.title,
            description: todo_data.description,
            state: todo_data.state,
        },
    )
    .await?;

    info!("[TODOS] Created todo id={} for user id={}", todo.id, user.id);
    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// `GET /api/todos` - list the caller's tasks with optional filters.
pub async fn list_todos(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Query(filter): Query<TodoFilterQuery>,
) -> Result<Json<TodoList>> {
    let user = current_user(&pool, &claims).await?;

    let todos = TodoRepository::list_for_user(
        &pool,
        user.id,
        TodoFilter {
            title: filter.title,
            description: filter.description,
            state: filter.state,
            offset: filter.offset,
            limit: filter.limit,
        },
    )
    .await?;

    Ok(Json(TodoList {
        todos: todos.into_iter().map(Into::into).collect(),
    }))
}

/// `PATCH /api/todos/{todo_id}` - partially update one of the caller's
/// tasks.
pub async fn update_todo(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(todo_id): Path<i64>,
    Json(todo_data): Json<TodoUpdateRequest>,
) -> Result<Json<TodoPublic>> {
    let user = current_user(&pool, &claims).await?;

    let updated = TodoRepository::update_for_user(
        &pool,
        todo_id,
        user.id,
        TodoForUpdate {
            title: todo_data.title,
            description: todo_data.description,
            state: todo_data.state,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound(TASK_NOT_FOUND.to_string()))?;

    info!("[TODOS] Updated todo id={} for user id={}", todo_id, user.id);
    Ok(Json(updated.into()))
}

/// `DELETE /api/todos/{todo_id}` - delete one of the caller's tasks.
pub async fn delete_todo(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(todo_id): Path<i64>,
) -> Result<Json<Message>> {
    let user = current_user(&pool, &claims).await?;

    if !TodoRepository::delete_for_user(&pool, todo_id, user.id).await? {
        return Err(AppError::NotFound(TASK_NOT_FOUND.to_string()));
    }

    info!("[TODOS] Deleted todo id={} for user id={}", todo_id, user.id);
    Ok(Json(Message {
        message: "Task has been deleted successfully.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::handlers::test_support::*;
    use lib_core::dto::todos::{TodoList, TodoPublic};
    use lib_core::dto::users::{ErrorResponse, Message};
    use lib_core::model::store::models::{TodoForCreate, TodoState};
    use lib_core::model::store::TodoRepository;

    #[tokio::test]
    async fn test_todos_require_auth() {
        let pool = setup_test_db().await;
        let app = test_app(pool).await;

        let response = app
            .oneshot(get_request("/api/todos"))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_todo_defaults_state() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let bearer = bearer_for(&alice);
        let app = test_app(pool).await;

        let response = app
            .oneshot(authed_json_request(
                Method::POST,
                "/api/todos",
                &bearer,
                json!({"title": "Buy milk", "description": "2 liters"}),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::CREATED);
        let todo: TodoPublic = read_json(response).await;
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.state, TodoState::Todo);
    }

    #[tokio::test]
    async fn test_create_todo_rejects_empty_title() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let bearer = bearer_for(&alice);
        let app = test_app(pool).await;

        let response = app
            .oneshot(authed_json_request(
                Method::POST,
                "/api/todos",
                &bearer,
                json!({"title": "  ", "description": "blank"}),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_todos_filters_and_scopes_by_owner() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let bob = seed_user(&pool, "bob", "bob@example.com", "SecurePass123!").await;

        for (owner, title, state) in [
            (alice.id, "Buy milk", TodoState::Todo),
            (alice.id, "Buy bread", TodoState::Done),
            (bob.id, "Buy cheese", TodoState::Done),
        ] {
            TodoRepository::create(
                &pool,
                owner,
                TodoForCreate {
                    title: title.to_string(),
                    description: String::new(),
                    state,
                },
            )
            .await
            .expect("seed todo should succeed");
        }

        let bearer = bearer_for(&alice);
        let app = test_app(pool).await;

        let response = app
            .clone()
            .oneshot(authed_request(Method::GET, "/api/todos", &bearer))
            .await
            .expect("request should succeed");
        let body: TodoList = read_json(response).await;
        assert_eq!(body.todos.len(), 2);

        let response = app
            .clone()
            .oneshot(authed_request(
                Method::GET,
                "/api/todos?state=done",
                &bearer,
            ))
            .await
            .expect("request should succeed");
        let body: TodoList = read_json(response).await;
        assert_eq!(body.todos.len(), 1);
        assert_eq!(body.todos[0].title, "Buy bread");

        let response = app
            .oneshot(authed_request(
                Method::GET,
                "/api/todos?title=milk",
                &bearer,
            ))
            .await
            .expect("request should succeed");
        let body: TodoList = read_json(response).await;
        assert_eq!(body.todos.len(), 1);
        assert_eq!(body.todos[0].title, "Buy milk");
    }

    #[tokio::test]
    async fn test_patch_todo() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let todo = TodoRepository::create(
            &pool,
            alice.id,
            TodoForCreate {
                title: "Buy milk".to_string(),
                description: String::new(),
                state: TodoState::Todo,
            },
        )
        .await
        .expect("seed todo should succeed");

        let bearer = bearer_for(&alice);
        let app = test_app(pool).await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                Method::PATCH,
                &format!("/api/todos/{}", todo.id),
                &bearer,
                json!({"state": "done"}),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::OK);
        let body: TodoPublic = read_json(response).await;
        assert_eq!(body.state, TodoState::Done);
        assert_eq!(body.title, "Buy milk");

        // Nonexistent id
        let response = app
            .oneshot(authed_json_request(
                Method::PATCH,
                "/api/todos/999",
                &bearer,
                json!({"state": "done"}),
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(response).await;
        assert_eq!(body.error, "Task not found.");
    }

    #[tokio::test]
    async fn test_patch_someone_elses_todo_is_not_found() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let bob = seed_user(&pool, "bob", "bob@example.com", "SecurePass123!").await;
        let todo = TodoRepository::create(
            &pool,
            alice.id,
            TodoForCreate {
                title: "Buy milk".to_string(),
                description: String::new(),
                state: TodoState::Todo,
            },
        )
        .await
        .expect("seed todo should succeed");

        let bearer = bearer_for(&bob);
        let app = test_app(pool).await;

        let response = app
            .oneshot(authed_json_request(
                Method::PATCH,
                &format!("/api/todos/{}", todo.id),
                &bearer,
                json!({"title": "hijacked"}),
            ))
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_todo() {
        let pool = setup_test_db().await;
        let alice = seed_user(&pool, "alice", "alice@example.com", "SecurePass123!").await;
        let todo = TodoRepository::create(
            &pool,
            alice.id,
            TodoForCreate {
                title: "Buy milk".to_string(),
                description: String::new(),
                state: TodoState::Todo,
            },
        )
        .await
        .expect("seed todo should succeed");

        let bearer = bearer_for(&alice);
        let app = test_app(pool).await;

        let response = app
            .clone()
            .oneshot(authed_request(
                Method::DELETE,
                &format!("/api/todos/{}", todo.id),
                &bearer,
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Message = read_json(response).await;
        assert_eq!(body.message, "Task has been deleted successfully.");

        // Second delete of the same id
        let response = app
            .oneshot(authed_request(
                Method::DELETE,
                &format!("/api/todos/{}", todo.id),
                &bearer,
            ))
            .await
            .expect("request should succeed");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
