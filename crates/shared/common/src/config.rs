//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ServiceConfig {
    /// Address to bind, as `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Database configuration.
#[derive(Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://usuarios.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_debug_redacts_url() {
        let config = DatabaseConfig {
            url: "postgres://admin:hunter2@db:5432/app".to_string(),
            ..DatabaseConfig::default()
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("max_connections: 10"));
    }

    #[test]
    fn test_service_addr() {
        let config = ServiceConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..ServiceConfig::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
