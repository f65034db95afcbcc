//! Configuration Module
//!
//! Loads server and cache settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Fixed TTL for the cached property collection, in seconds.
pub const DEFAULT_CACHE_TTL: u64 = 3600;

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for the cached collection entry
    pub cache_ttl: u64,
    /// Deadline for each cache store call
    pub cache_timeout: Duration,
    /// Deadline for each record store call
    pub store_timeout: Duration,
    /// In-memory cache housekeeping interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Collection TTL in seconds (default: 3600)
    /// - `CACHE_TIMEOUT_MS` - Per-call cache deadline (default: 500)
    /// - `STORE_TIMEOUT_MS` - Per-call record store deadline (default: 5000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cache_timeout: Duration::from_millis(env_or(
                "CACHE_TIMEOUT_MS",
                defaults.cache_timeout.as_millis() as u64,
            )),
            store_timeout: Duration::from_millis(env_or(
                "STORE_TIMEOUT_MS",
                defaults.store_timeout.as_millis() as u64,
            )),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_timeout: Duration::from_millis(500),
            store_timeout: Duration::from_millis(5000),
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_timeout, Duration::from_millis(500));
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_TTL");
        env::remove_var("CACHE_TIMEOUT_MS");
        env::remove_var("STORE_TIMEOUT_MS");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.cache_timeout, Duration::from_millis(500));
        assert_eq!(config.store_timeout, Duration::from_secs(5));
    }
}
