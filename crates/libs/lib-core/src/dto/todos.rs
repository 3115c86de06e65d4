//! # Todo Data Transfer Objects
//!
//! Request and response structures for the todo endpoints. All todo
//! endpoints operate on the authenticated user's own tasks only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::store::models::{Todo, TodoState};

/// Request body for `POST /api/todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoCreateRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub state: TodoState,
}

/// Request body for `PATCH /api/todos/{id}`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

/// Public todo representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoPublic {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Response body for `GET /api/todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

/// Query parameters for `GET /api/todos`: substring filters on title and
/// description, exact filter on state, plus pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoFilterQuery {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}
