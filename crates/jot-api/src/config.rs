//! Server configuration from environment variables.

use jot_core::{Error, Result};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default requests-per-period for the global rate limiter.
pub const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;

/// Default rate-limit period in seconds.
pub const DEFAULT_RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Postgres connection string.
    pub database_url: String,
    /// The single backend API key clients must present.
    pub api_key: String,
    /// Comma-separated allowed CORS origins.
    pub cors_origins: Vec<String>,
    pub rate_limit_enabled: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_period_secs: u64,
    /// Run embedded migrations on startup.
    pub migrate_on_startup: bool,
}

impl ApiConfig {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` and `JOT_API_KEY` are required; everything else has a
    /// default. Inference configuration (`OPENAI_*`) is read separately by
    /// the backend's own `from_env`.
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::Config("DATABASE_URL must be set".to_string()))?;

        let api_key = std::env::var("JOT_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::Config(
                    "JOT_API_KEY must be set; clients send it as X-API-Key or Bearer token"
                        .to_string(),
                )
            })?;

        let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            database_url,
            api_key,
            cors_origins,
            rate_limit_enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            rate_limit_requests: std::env::var("RATE_LIMIT_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_REQUESTS),
            rate_limit_period_secs: std::env::var("RATE_LIMIT_PERIOD_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RATE_LIMIT_PERIOD_SECS),
            migrate_on_startup: std::env::var("MIGRATE_ON_STARTUP")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        })
    }
}
