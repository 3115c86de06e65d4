//! # Todo Repository
//!
//! Database access layer for todo records. Every query is scoped by
//! `user_id`: a user can never read or mutate another user's tasks
//! through this module.

use sqlx::query_as;

use super::models::{Todo, TodoFilter, TodoForCreate, TodoForUpdate};
use super::DbPool;

/// Todo repository for database operations.
pub struct TodoRepository;

impl TodoRepository {
    /// Create a new todo owned by `user_id`.
    pub async fn create(
        pool: &DbPool,
        user_id: i64,
        todo_data: TodoForCreate,
    ) -> Result<Todo, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO todos (user_id, title, description, state) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(&todo_data.title)
        .bind(&todo_data.description)
        .bind(todo_data.state.to_string())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Todo>("SELECT * FROM todos WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Find a todo by id, but only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &DbPool,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Todo>, sqlx::Error> {
        query_as::<_, Todo>("SELECT * FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List todos owned by `user_id`, applying the given filters.
    pub async fn list_for_user(
        pool: &DbPool,
        user_id: i64,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, sqlx::Error> {
        // Build the WHERE clause dynamically, same discipline as
        // UserRepository::update: push the condition, bind in the same order.
        let mut conditions = vec!["user_id = ?"];

        if filter.title.is_some() {
            conditions.push("title LIKE '%' || ? || '%'");
        }
        if filter.description.is_some() {
            conditions.push("description LIKE '%' || ? || '%'");
        }
        if filter.state.is_some() {
            conditions.push("state = ?");
        }

        let query_str = format!(
            "SELECT * FROM todos WHERE {} ORDER BY id LIMIT ? OFFSET ?",
            conditions.join(" AND ")
        );

        let mut query = query_as::<_, Todo>(&query_str).bind(user_id);

        if let Some(ref title) = filter.title {
            query = query.bind(title);
        }
        if let Some(ref description) = filter.description {
            query = query.bind(description);
        }
        if let Some(state) = filter.state {
            query = query.bind(state.to_string());
        }

        query.bind(filter.limit).bind(filter.offset).fetch_all(pool).await
    }

    /// Partially update a todo owned by `user_id`.
    ///
    /// Returns `Ok(None)` when the todo does not exist or belongs to
    /// someone else.
    pub async fn update_for_user(
        pool: &DbPool,
        id: i64,
        user_id: i64,
        todo_data: TodoForUpdate,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let mut updates = Vec::new();

        if todo_data.title.is_some() {
            updates.push("title = ?");
        }
        if todo_data.description.is_some() {
            updates.push("description = ?");
        }
        if todo_data.state.is_some() {
            updates.push("state = ?");
        }

        if updates.is_empty() {
            return Self::find_for_user(pool, id, user_id).await;
        }

        updates.push("updated_at = CURRENT_TIMESTAMP");
        let query_str = format!(
            "UPDATE todos SET {} WHERE id = ? AND user_id = ?",
            updates.join(", ")
        );

        let mut query = sqlx::query(&query_str);

        if let Some(ref title) = todo_data.title {
            query = query.bind(title);
        }
        if let Some(ref description) = todo_data.description {
            query = query.bind(description);
        }
        if let Some(state) = todo_data.state {
            query = query.bind(state.to_string());
        }

        let result = query.bind(id).bind(user_id).execute(pool).await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_for_user(pool, id, user_id).await
    }

    /// Delete a todo owned by `user_id`. Returns `true` when a row was
    /// actually removed.
    pub async fn delete_for_user(
        pool: &DbPool,
        id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
