//! # Server Setup
//!
//! Startup sequencing, route registration, and HTTP server startup.
//!
//! The startup order is fixed: configuration, database pool, migrations,
//! and only then the listening socket. [`migrate_and_bind`] is the gate
//! that keeps the socket closed until the schema is at head, so a client
//! that can connect at all is guaranteed a fully migrated database.

// region: --- Imports
use std::path::Path;

use axum::routing::{get, patch, post, put};
use axum::Router;
use lib_core::config::{core_config, init_config};
use lib_core::{create_pool, Config, DbPool};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8000".to_string(),
                "http://127.0.0.1:8000".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Startup Sequencing
/// Apply every pending migration to the database.
///
/// Re-running against an already migrated database is a no-op; sqlx
/// tracks applied versions in its `_sqlx_migrations` table.
pub async fn run_migrations(pool: &DbPool, migrations_path: &Path) -> anyhow::Result<()> {
    info!(
        "[STARTUP] Running database migrations from: {}",
        migrations_path.display()
    );
    let migrator = sqlx::migrate::Migrator::new(migrations_path).await?;
    migrator.run(pool).await?;
    info!("[STARTUP] Migrations complete");
    Ok(())
}

/// Run migrations to head, then open the listening socket.
///
/// The socket does not exist until every migration has applied. A
/// migration failure returns the error without ever binding, so nothing
/// is listening on `bind_address` and health checks against it fail.
pub async fn migrate_and_bind(
    pool: &DbPool,
    migrations_path: &Path,
    bind_address: &str,
) -> anyhow::Result<TcpListener> {
    run_migrations(pool, migrations_path).await?;

    let listener = TcpListener::bind(bind_address).await?;
    Ok(listener)
}
// endregion: --- Startup Sequencing

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
///
/// Callers (the backend binary) turn any of these into a non-zero exit.
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    init_tracing();

    info!("[STARTUP] TASKZERO BACKEND STARTING");

    dotenvy::dotenv().ok();

    info!("[STARTUP] Loading configuration");
    init_config().map_err(|e| anyhow::anyhow!(e))?;
    let app_config = core_config().clone();

    // Ensure the parent directory exists for file-backed SQLite databases
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("[STARTUP] Created database directory: {:?}", parent);
            }
        }
    }

    info!("[STARTUP] Connecting to database: {}", app_config.database_url);
    let pool = create_pool(&app_config.database_url).await?;

    let listener = migrate_and_bind(
        &pool,
        Path::new(server_config.migrations_path),
        &server_config.bind_address,
    )
    .await?;

    let state = AppState {
        db: pool,
        config: app_config,
    };
    let app = create_router(state, server_config.allowed_origins.clone());

    info!("[STARTUP] SERVER READY: http://{}", listener.local_addr()?);
    log_routes();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("[SHUTDOWN] Server stopped");
    Ok(())
}

/// Create the main application router with all routes.
///
/// Public routes (account creation, login, health) and protected routes
/// are built separately; the protected set sits behind the JWT middleware
/// and the two are merged into one router.
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    use axum::http::{header, HeaderValue, Method, StatusCode};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let public = Router::new()
        .route("/", get(handlers::root::read_root))
        .route("/hello", get(handlers::root::hello_page))
        .route("/health", get(handlers::root::health))
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/{user_id}", get(handlers::users::get_user))
        .route("/api/auth/login", post(handlers::auth::login));

    let protected = Router::new()
        .route("/api/users", get(handlers::users::list_users))
        .route(
            "/api/users/{user_id}",
            put(handlers::users::update_user).delete(handlers::users::delete_user),
        )
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route(
            "/api/todos",
            post(handlers::todos::create_todo).get(handlers::todos::list_todos),
        )
        .route(
            "/api/todos/{todo_id}",
            patch(handlers::todos::update_todo).delete(handlers::todos::delete_todo),
        )
        .route_layer(axum::middleware::from_fn(require_auth));

    public
        .merge(protected)
        .fallback(|| async { (StatusCode::NOT_FOUND, "Route not found") })
        .with_state(state)
        // Layers run outside-in: cors, stamp_req, log_requests, trace
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(log_requests))
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Configure the tracing subscriber from the `LOG_LEVEL` variable.
fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" => tracing_subscriber::EnvFilter::new("trace"),
        "debug" => tracing_subscriber::EnvFilter::new("debug"),
        "warn" => tracing_subscriber::EnvFilter::new("warn"),
        "error" => tracing_subscriber::EnvFilter::new("error"),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global tracing subscriber");
}

/// Resolve when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("[SHUTDOWN] Ctrl+C received"),
        _ = terminate => info!("[SHUTDOWN] SIGTERM received"),
    }
}

/// Log the route table at startup
fn log_routes() {
    info!(" USERS:");
    info!("   • POST   /api/users");
    info!("   • GET    /api/users?offset=0&limit=10 (auth)");
    info!("   • GET    /api/users/{{user_id}}");
    info!("   • PUT    /api/users/{{user_id}} (auth, self only)");
    info!("   • DELETE /api/users/{{user_id}} (auth, self only)");
    info!(" AUTH:");
    info!("   • POST   /api/auth/login");
    info!("   • POST   /api/auth/refresh (auth)");
    info!(" TODOS (all auth):");
    info!("   • POST   /api/todos");
    info!("   • GET    /api/todos?title=&state=&offset=0&limit=10");
    info!("   • PATCH  /api/todos/{{todo_id}}");
    info!("   • DELETE /api/todos/{{todo_id}}");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
