//! # User Repository
//!
//! Database access layer for user records, following the repository
//! pattern: static async functions over a pool, plain SQL with positional
//! binds.

use sqlx::query_as;

use super::models::{User, UserForCreate, UserForUpdate};
use super::DbPool;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their email address.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their username.
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List users ordered by id, with pagination.
    pub async fn list(pool: &DbPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Create a new user in the database.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the username or email already exists
    /// (UNIQUE constraint violation) or the connection fails.
    pub async fn create(pool: &DbPool, user_data: UserForCreate) -> Result<User, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(&user_data.username)
                .bind(&user_data.email)
                .bind(&user_data.password_hash)
                .execute(pool)
                .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update an existing user using `UserForUpdate`.
    ///
    /// Only fields that are `Some` in `user_data` will be updated;
    /// `updated_at` is bumped whenever anything changes.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        user_data: UserForUpdate,
    ) -> Result<User, sqlx::Error> {
        // Build update query dynamically
        let mut updates = Vec::new();

        if user_data.username.is_some() {
            updates.push("username = ?");
        }
        if user_data.email.is_some() {
            updates.push("email = ?");
        }
        if user_data.password_hash.is_some() {
            updates.push("password_hash = ?");
        }

        if updates.is_empty() {
            // No updates, just return the existing user
            return query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(id)
                .fetch_one(pool)
                .await;
        }

        updates.push("updated_at = CURRENT_TIMESTAMP");
        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref username) = user_data.username {
            query = query.bind(username);
        }
        if let Some(ref email) = user_data.email {
            query = query.bind(email);
        }
        if let Some(ref password_hash) = user_data.password_hash {
            query = query.bind(password_hash);
        }

        query.bind(id).execute(pool).await?;

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a user. Returns `true` when a row was actually removed.
    ///
    /// Todos owned by the user are removed by the `ON DELETE CASCADE`
    /// foreign key.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
