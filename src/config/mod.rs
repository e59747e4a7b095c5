//! Configuration handling for the service.
//!
//! Pipeline policy (timeouts, image caps, the host allow-list, selector
//! chains) is compile-time data in `scraper::policy`; only deployment
//! concerns live here. `Config::from_env` reads environment variables with
//! sensible development defaults.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests and build
/// scripts refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_RATE_LIMIT_MAX_REQUESTS: &str = "RATE_LIMIT_MAX_REQUESTS";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "RATE_LIMIT_WINDOW_SECS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    rate_limit_max_requests: u32,
    rate_limit_window_secs: i64,
}

impl Config {
    pub fn new(
        bind_addr: impl Into<String>,
        rate_limit_max_requests: u32,
        rate_limit_window_secs: i64,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            rate_limit_max_requests,
            rate_limit_window_secs,
        }
    }

    /// Load from environment variables, falling back to development
    /// defaults. Unparseable numeric values are rejected rather than
    /// silently defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let rate_limit_max_requests = match env::var(ENV_RATE_LIMIT_MAX_REQUESTS) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_MAX_REQUESTS,
                reason: format!("'{raw}' is not a positive integer"),
            })?,
            Err(_) => DEFAULT_RATE_LIMIT_MAX_REQUESTS,
        };

        let rate_limit_window_secs = match env::var(ENV_RATE_LIMIT_WINDOW_SECS) {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                field: ENV_RATE_LIMIT_WINDOW_SECS,
                reason: format!("'{raw}' is not a number of seconds"),
            })?,
            Err(_) => DEFAULT_RATE_LIMIT_WINDOW_SECS,
        };

        Ok(Self {
            bind_addr,
            rate_limit_max_requests,
            rate_limit_window_secs,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Requests allowed per client IP within one window.
    pub fn rate_limit_max_requests(&self) -> u32 {
        self.rate_limit_max_requests
    }
    /// Rate-limit window length in seconds.
    pub fn rate_limit_window_secs(&self) -> i64 {
        self.rate_limit_window_secs
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
