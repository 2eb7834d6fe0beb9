//! Configuration module for the practice services backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Raised when an environment variable holds a value that cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL for the catalog; in-memory unless overridden
    pub database_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of the human-readable format
    pub log_json: bool,
    /// Simulated latency of a client service request submission
    pub request_latency: Duration,
    /// How long a request dialog may sit idle before it is discarded
    pub request_ttl: Duration,
    /// Number of recent notifications kept for the toast feed
    pub notification_capacity: usize,
    /// Whether to load the sample catalog at startup
    pub seed_catalog: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("PRACTICE_DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

        let bind_addr = parse_var("PRACTICE_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("PRACTICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = parse_var("PRACTICE_LOG_JSON", "false")?;

        let latency_ms: u64 = parse_var("PRACTICE_REQUEST_LATENCY_MS", "1500")?;
        let ttl_secs: u64 = parse_var("PRACTICE_REQUEST_TTL_SECS", "1800")?;
        let notification_capacity = parse_var("PRACTICE_NOTIFICATION_CAPACITY", "50")?;
        let seed_catalog = parse_var("PRACTICE_SEED_CATALOG", "true")?;

        Ok(Self {
            database_url,
            bind_addr,
            log_level,
            log_json,
            request_latency: Duration::from_millis(latency_ms),
            request_ttl: Duration::from_secs(ttl_secs),
            notification_capacity,
            seed_catalog,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|_| ConfigError { var, value })
}
