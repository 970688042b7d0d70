//! Usuario service configuration.

use std::env;
use std::time::Duration;

use common::{DatabaseConfig, ServiceConfig};

/// Usuario service configuration.
#[derive(Debug, Clone)]
pub struct UsuarioServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

impl UsuarioServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                host: env::var("USUARIO_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: parse_env("USUARIO_SERVICE_PORT").unwrap_or(defaults.service.port),
                log_level: env::var("RUST_LOG").unwrap_or(defaults.service.log_level),
                request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS")
                    .unwrap_or(defaults.service.request_timeout_secs),
                ..defaults.service
            },
            database: DatabaseConfig {
                url: env::var("USUARIO_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.request_timeout_secs)
    }
}

impl Default for UsuarioServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "usuario-service".to_string(),
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
        }
    }
}
