//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use postline_infra::{DatabaseConfig, GenerationConfig, RedisConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub redis: Option<RedisConfig>,
    pub generation: Option<GenerationConfig>,
    /// TTL for the per-user post-list cache snapshot.
    pub post_cache_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables. Absent backends
    /// (database, Redis, generation endpoint) come back as `None`; the
    /// state builder picks fallbacks.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: DatabaseConfig::from_env(),
            redis: RedisConfig::from_env(),
            generation: GenerationConfig::from_env(),
            post_cache_ttl: Duration::from_secs(
                env::var("POST_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }
}
