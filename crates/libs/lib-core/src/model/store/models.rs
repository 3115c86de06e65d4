//! Database entities and the data shapes used to create and update them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must be hashed before constructing this.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

/// Data structure for updating an existing user.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserForUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }
}

/// Lifecycle state of a todo.
///
/// Stored as TEXT in the database; an unknown value in a row is a decode
/// error rather than being silently coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoState {
    Draft,
    #[default]
    Todo,
    Doing,
    Done,
    Trash,
}

impl std::fmt::Display for TodoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoState::Draft => write!(f, "draft"),
            TodoState::Todo => write!(f, "todo"),
            TodoState::Doing => write!(f, "doing"),
            TodoState::Done => write!(f, "done"),
            TodoState::Trash => write!(f, "trash"),
        }
    }
}

impl std::str::FromStr for TodoState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TodoState::Draft),
            "todo" => Ok(TodoState::Todo),
            "doing" => Ok(TodoState::Doing),
            "done" => Ok(TodoState::Done),
            "trash" => Ok(TodoState::Trash),
            _ => Err(format!("Invalid todo state: {}", s)),
        }
    }
}

impl TryFrom<String> for TodoState {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Todo entity representing a complete task record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new todo.
#[derive(Debug, Clone)]
pub struct TodoForCreate {
    pub title: String,
    pub description: String,
    pub state: TodoState,
}

/// Data structure for partially updating a todo.
#[derive(Debug, Clone, Default)]
pub struct TodoForUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
}

/// Filters for listing a user's todos.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    /// Substring match on title.
    pub title: Option<String>,
    /// Substring match on description.
    pub description: Option<String>,
    /// Exact match on state.
    pub state: Option<TodoState>,
    pub offset: i64,
    pub limit: i64,
}
