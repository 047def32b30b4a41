use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Rate limiting is off when no URL is configured.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisConfig {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub requests_per_window: i64,
    pub window_seconds: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 100,
            window_seconds: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CalendarConfig {
    /// Offset of the service time zone; travel days are cut at local midnight.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    #[serde(default = "default_max_seats")]
    pub max_seats_per_booking: usize,
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,
}

fn default_max_seats() -> usize {
    9
}

fn default_featured_limit() -> usize {
    6
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_seats_per_booking: default_max_seats(),
            featured_limit: default_featured_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. VOYRA__STORAGE__BACKEND=memory
            .add_source(config::Environment::with_prefix("VOYRA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let config = parse(
            r#"
            [server]
            port = 8080
            [storage]
            backend = "memory"
            [auth]
            jwt_secret = "secret"
            "#,
        );

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.max_connections, 5);
        assert!(config.redis.url.is_none());
        assert_eq!(config.booking.max_seats_per_booking, 9);
        assert_eq!(config.booking.featured_limit, 6);
        assert_eq!(config.calendar.utc_offset_minutes, 0);
        assert_eq!(config.rate_limit.requests_per_window, 100);
    }

    #[test]
    fn test_postgres_backend() {
        let config = parse(
            r#"
            [server]
            port = 3000
            [storage]
            backend = "postgres"
            database_url = "postgres://voyra@localhost/voyra"
            max_connections = 12
            [redis]
            url = "redis://127.0.0.1/"
            [auth]
            jwt_secret = "secret"
            [calendar]
            utc_offset_minutes = 330
            "#,
        );

        assert_eq!(config.storage.backend, StorageBackend::Postgres);
        assert_eq!(config.storage.max_connections, 12);
        assert_eq!(config.calendar.utc_offset_minutes, 330);
        assert!(config.redis.url.is_some());
    }
}
