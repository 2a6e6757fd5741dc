//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_APP_ENV, DEFAULT_DATABASE_URL, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_TOKEN_TTL_HOURS,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub environment: String,
    pub token_ttl_hours: i64,
    pub query_timeout_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    admin_registration_key: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("query_timeout_secs", &self.query_timeout_secs)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field(
                "admin_registration_key",
                &self.admin_registration_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            environment: DEFAULT_APP_ENV.to_string(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            admin_registration_key: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_registration_key = env::var("ADMIN_REGISTRATION_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        if admin_registration_key.is_none() {
            tracing::info!("ADMIN_REGISTRATION_KEY not set, admin registration disabled");
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            environment: env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_APP_ENV.to_string()),
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|hours: &i64| *hours > 0)
                .unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            query_timeout_secs: env::var("QUERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(DEFAULT_QUERY_TIMEOUT_SECS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            admin_registration_key,
        }
    }

    /// Set the admin bootstrap key (used by tests and embedding callers).
    pub fn with_admin_registration_key(mut self, key: impl Into<String>) -> Self {
        self.admin_registration_key = Some(key.into());
        self
    }

    /// Admin bootstrap key, if admin registration is enabled.
    pub fn admin_registration_key(&self) -> Option<&str> {
        self.admin_registration_key.as_deref()
    }

    /// Lifetime of a freshly issued authentication token.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }

    /// Deadline applied to token and permission lookups.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
