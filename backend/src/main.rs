//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Startup is strictly ordered: migrations run to completion before the
//! listening socket opens. Any failure along the way propagates out of
//! `main` and exits the process with a non-zero status, so a supervisor
//! sees a migration failure the same way it sees a crash.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    let config = ServerConfig {
        bind_address,
        migrations_path: "migrations",
        ..Default::default()
    };

    start_server(config).await
}
