//! # Web Library
//!
//! HTTP interface for the application: route handlers, middleware, and
//! server startup.
//!
//! [`start_server`] is the single entry point used by the backend binary.
//! It loads configuration, runs the database migrations, and only then
//! opens the listening socket.

// region: --- Modules
pub mod handlers;
pub mod middleware;
pub mod server;
// endregion: --- Modules

// region: --- Re-exports
pub use server::{
    create_router, migrate_and_bind, run_migrations, start_server, AppState, ServerConfig,
};
// endregion: --- Re-exports
