//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! so the process fails fast if misconfigured.
//!
//! The same [`Config`] instance feeds every consumer of the database URL —
//! the migration runner and the request-path pool see identical connection
//! settings by construction.
//!
//! Use [`core_config()`] to access the global configuration instance after
//! [`init_config()`] (or [`init_config_from()`]) has run at startup.

use std::env;
use std::sync::OnceLock;

use lib_utils::envs::get_env;

/// Default database location when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite:data/taskzero.db";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// Must be at least 32 characters long.
    pub jwt_secret: String,

    /// JWT token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days).
    pub jwt_expiration_hours: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = get_env("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment".to_string())?;

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|e| format!("JWT_EXPIRATION_HOURS must be a valid number: {}", e))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load, validate, and install the global configuration from the environment.
///
/// Call once at application startup, before anything that needs
/// [`core_config()`] runs.
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    init_config_from(config)
}

/// Install an already-built configuration as the global instance.
///
/// Used by [`init_config()`] and by tests that construct their config
/// directly instead of going through the environment.
pub fn init_config_from(config: Config) -> Result<(), String> {
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("config not initialized - call init_config() at startup")
}
