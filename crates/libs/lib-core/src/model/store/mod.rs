//! # Database Store
//!
//! Database connection pool and repository implementations.

// region: --- Modules
pub mod models;
pub mod todo_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use todo_repository::TodoRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool.
///
/// The database file is created if it does not exist yet; schema content
/// is owned by the migration scripts, not by this function. Foreign keys
/// are enabled per connection; SQLite leaves them off by default and the
/// todos table relies on `ON DELETE CASCADE`.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
